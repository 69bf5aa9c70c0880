#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Structural validation of media files for bitcheck
//!
//! Each supported media type maps to one external validator
//! ([`ValidatorSpec`]). The [`ToolRegistry`] holds that fixed table, a
//! [`ToolRunner`] executes a validator for one file, and the
//! [`OutputClassifier`] turns the unstructured text it prints into
//! [`bitcheck_types::Warning`]s. Nothing past this crate looks at raw
//! validator output.

pub mod builtin;
pub mod classify;
pub mod registry;
pub mod runner;
pub mod search_path;
pub mod spec;

pub use classify::OutputClassifier;
pub use registry::ToolRegistry;
pub use runner::{RawOutput, ToolRunner, ValidatorRunner};
pub use search_path::SearchPath;
pub use spec::{Rule, ValidatorSpec};
