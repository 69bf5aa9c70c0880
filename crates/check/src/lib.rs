#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Verification engine for bitcheck
//!
//! For each selected item the [`Orchestrator`] runs up to two phases:
//! the checksum phase compares, adds or replaces the stored BLAKE3 digest,
//! and the integrity phase runs the media type's validator and classifies
//! its output. Results are collected into a [`BatchReport`] in input order,
//! whatever the concurrency.

pub mod checksum;
pub mod mode;
pub mod orchestrator;
pub mod outcome;
pub mod report;

pub use checksum::{ChecksumAction, ChecksumMode, ChecksumRecord};
pub use mode::{CheckOptions, RunMode, RunPhases};
pub use orchestrator::{list_validators, Orchestrator, OVERWRITE_PROMPT};
pub use outcome::{ChecksumFailure, Counts, FileOutcome, FileStatus, ToolError};
pub use report::{BatchReport, ExportEntry, ToolStatus, EXIT_FAILURE, EXIT_SUCCESS};
