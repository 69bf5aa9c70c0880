//! Fixed names used to derive default locations for bitcheck
//!
//! The directories themselves come from the platform (`dirs`), only the
//! application-specific leaf names live here.

pub const APP_DIR: &str = "bitcheck";

pub const CONFIG_FILE: &str = "config.toml";
pub const LIBRARY_FILE: &str = "library.db";
pub const LOGS_DIR: &str = "logs";
