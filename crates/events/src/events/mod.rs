use serde::{Deserialize, Serialize};

use crate::EventSource;
use bitcheck_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Construct a new failure context.
    #[must_use]
    pub fn new(
        code: Option<impl Into<String>>,
        message: impl Into<String>,
        hint: Option<impl Into<String>>,
        retryable: bool,
    ) -> Self {
        Self {
            code: code.map(Into::into),
            message: message.into(),
            hint: hint.map(Into::into),
            retryable,
        }
    }

    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self::new(
            error.user_code(),
            error.user_message().into_owned(),
            error.user_hint(),
            error.is_retryable(),
        )
    }
}

pub mod check;
pub mod general;
pub mod library;

pub use check::*;
pub use general::*;
pub use library::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, operations)
    General(GeneralEvent),

    /// Verification runs (checksums and validators)
    Check(CheckEvent),

    /// Item store maintenance
    Library(LibraryEvent),
}

impl AppEvent {
    /// Identify the source domain for this event (used for metadata/logging).
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::General(_) => EventSource::GENERAL,
            Self::Check(_) => EventSource::CHECK,
            Self::Library(_) => EventSource::LIBRARY,
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::Check(CheckEvent::RunFailed { .. })
            | Self::Library(LibraryEvent::ImportFailed { .. }) => Level::ERROR,

            Self::General(GeneralEvent::Warning { .. })
            | Self::Check(
                CheckEvent::ValidatorSkipped { .. }
                | CheckEvent::ItemChecked {
                    verdict: ItemVerdict::Failed | ItemVerdict::Unreadable,
                    ..
                },
            ) => Level::WARN,

            Self::Check(CheckEvent::ItemChecked { .. } | CheckEvent::ChecksumWritten { .. })
            | Self::Library(LibraryEvent::ItemImported { .. }) => Level::DEBUG,

            _ => Level::INFO,
        }
    }

    /// Get the log target for this event (for structured logging)
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::General(_) => "bitcheck::events::general",
            Self::Check(_) => "bitcheck::events::check",
            Self::Library(_) => "bitcheck::events::library",
        }
    }
}
