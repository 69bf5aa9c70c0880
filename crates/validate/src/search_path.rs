//! Locating validator executables

use bitcheck_errors::ValidatorError;
use std::ffi::OsString;
use std::path::PathBuf;

/// Where executables are looked up
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchPath {
    /// The process `PATH`
    #[default]
    Env,
    /// An explicit `PATH`-style list of directories
    Explicit(OsString),
}

impl SearchPath {
    /// Search only the given directories, in order
    ///
    /// # Errors
    ///
    /// Returns `ValidatorError::InvalidSearchPath` if a directory name
    /// contains the platform path separator.
    pub fn from_dirs<I, P>(dirs: I) -> Result<Self, ValidatorError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let dirs: Vec<PathBuf> = dirs.into_iter().map(Into::into).collect();
        std::env::join_paths(dirs)
            .map(Self::Explicit)
            .map_err(|e| ValidatorError::InvalidSearchPath {
                message: e.to_string(),
            })
    }

    /// Absolute path of `tool`, if an executable by that name exists
    #[must_use]
    pub fn resolve(&self, tool: &str) -> Option<PathBuf> {
        match self {
            Self::Env => which::which(tool).ok(),
            Self::Explicit(paths) => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                which::which_in(tool, Some(paths), cwd).ok()
            }
        }
    }
}
