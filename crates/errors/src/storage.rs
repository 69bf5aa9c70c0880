//! Stored-data error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// A persisted value (e.g. a stored checksum) could not be decoded
    #[error("corrupted data: {message}")]
    CorruptedData { message: String },
}

impl UserFacingError for StorageError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::CorruptedData { .. } => {
                Some("Recompute the checksum with `bitcheck check --force`.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::CorruptedData { .. } => Some("storage.corrupted_data"),
        }
    }
}
