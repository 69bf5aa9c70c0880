//! Verification error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum CheckError {
    /// Recomputed digest differs from the stored one.
    #[error("checksum mismatch for {path}: stored {stored}, computed {computed}")]
    ChecksumMismatch {
        path: String,
        stored: String,
        computed: String,
    },
}

impl UserFacingError for CheckError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::ChecksumMismatch { .. } => Some("check.checksum_mismatch"),
        }
    }
}
