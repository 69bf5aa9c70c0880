//! External validator errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Errors raised while resolving or running an external structural validator.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ValidatorError {
    #[error("{tool} not found on the search path")]
    ToolUnavailable { tool: String },

    #[error("failed to run {tool}: {message}")]
    SpawnFailed { tool: String, message: String },

    #[error("{tool} timed out after {seconds}s")]
    TimedOut { tool: String, seconds: u64 },

    #[error("invalid classification rule '{pattern}': {message}")]
    InvalidRule { pattern: String, message: String },

    #[error("more than one validator registered for {media_type}")]
    DuplicateSpec { media_type: String },

    #[error("invalid validator search path: {message}")]
    InvalidSearchPath { message: String },
}

impl ValidatorError {
    /// Name of the executable involved, when there is one.
    #[must_use]
    pub fn tool(&self) -> Option<&str> {
        match self {
            Self::ToolUnavailable { tool }
            | Self::SpawnFailed { tool, .. }
            | Self::TimedOut { tool, .. } => Some(tool),
            Self::InvalidRule { .. }
            | Self::DuplicateSpec { .. }
            | Self::InvalidSearchPath { .. } => None,
        }
    }
}

impl UserFacingError for ValidatorError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ToolUnavailable { .. } => {
                Some("Install the validator or run `bitcheck check --list-tools` to see what is missing.")
            }
            Self::TimedOut { .. } => Some("Raise check.tool_timeout or unset it."),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::TimedOut { .. } | Self::SpawnFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::ToolUnavailable { .. } => "validator.tool_unavailable",
            Self::SpawnFailed { .. } => "validator.spawn_failed",
            Self::TimedOut { .. } => "validator.timed_out",
            Self::InvalidRule { .. } => "validator.invalid_rule",
            Self::DuplicateSpec { .. } => "validator.duplicate_spec",
            Self::InvalidSearchPath { .. } => "validator.invalid_search_path",
        };
        Some(code)
    }
}
