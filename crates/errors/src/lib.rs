#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for bitcheck
//!
//! This crate provides fine-grained error types organized by domain.
//! All error types implement Clone so per-file failures can be carried
//! inside batch reports.

use std::borrow::Cow;

use thiserror::Error;

pub mod check;
pub mod config;
pub mod library;
pub mod storage;
pub mod validator;

// Re-export all error types at the root
pub use check::CheckError;
pub use config::ConfigError;
pub use library::LibraryError;
pub use storage::StorageError;
pub use validator::ValidatorError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("library error: {0}")]
    Library(#[from] LibraryError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("validator error: {0}")]
    Validator(#[from] ValidatorError),

    #[error("check error: {0}")]
    Check(#[from] CheckError),

    #[error("I/O error: {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
        path: Option<std::path::PathBuf>,
    },
}

impl Error {
    /// Create an Io error with an associated path
    pub fn io_with_path(err: &std::io::Error, path: impl Into<std::path::PathBuf>) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: Some(path.into()),
        }
    }

    /// The OS error text for I/O failures, verbatim.
    #[must_use]
    pub fn os_message(&self) -> Option<&str> {
        match self {
            Self::Io { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: None,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Self::Library(LibraryError::DatabaseError {
            message: err.to_string(),
        })
    }
}

/// Result type alias for bitcheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for analytics / structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Validator(err) => err.user_message(),
            Error::Check(err) => err.user_message(),
            Error::Io { message, .. } => Cow::Owned(message.clone()),
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Storage(err) => err.user_hint(),
            Error::Library(err) => err.user_hint(),
            Error::Config(err) => err.user_hint(),
            Error::Validator(err) => err.user_hint(),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Error::Storage(err) => err.is_retryable(),
            Error::Library(err) => err.is_retryable(),
            Error::Validator(err) => err.is_retryable(),
            Error::Io { .. } => true,
            _ => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Storage(err) => err.user_code(),
            Error::Library(err) => err.user_code(),
            Error::Config(err) => err.user_code(),
            Error::Validator(err) => err.user_code(),
            Error::Check(err) => err.user_code(),
            Error::Io { .. } => Some("error.io"),
        }
    }
}
