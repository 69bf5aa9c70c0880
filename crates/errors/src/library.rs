//! Library (item store) error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum LibraryError {
    #[error("database error: {message}")]
    DatabaseError { message: String },

    #[error("migration failed: {message}")]
    MigrationFailed { message: String },

    #[error("item not found: {id}")]
    ItemNotFound { id: i64 },

    #[error("invalid selector term '{term}': {reason}")]
    InvalidSelector { term: String, reason: String },

    #[error("import failed for {path}: {message}")]
    ImportFailed { path: String, message: String },

    #[error("path is not valid UTF-8: {path}")]
    UnsupportedPath { path: String },
}

impl UserFacingError for LibraryError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::DatabaseError { .. } | Self::MigrationFailed { .. } => {
                Some("Check the library path (--library or BITCHECK_LIBRARY) and its permissions.")
            }
            Self::InvalidSelector { .. } => {
                Some("Use `type:<mp3|flac|ogg>` or a plain path fragment as query terms.")
            }
            Self::ImportFailed { .. } => Some("Make sure the path exists and is readable."),
            Self::UnsupportedPath { .. } => Some("Rename the file so its path is valid UTF-8."),
            Self::ItemNotFound { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::DatabaseError { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::DatabaseError { .. } => "library.database",
            Self::MigrationFailed { .. } => "library.migration_failed",
            Self::ItemNotFound { .. } => "library.item_not_found",
            Self::InvalidSelector { .. } => "library.invalid_selector",
            Self::ImportFailed { .. } => "library.import_failed",
            Self::UnsupportedPath { .. } => "library.unsupported_path",
        };
        Some(code)
    }
}
