//! Normalized integrity warnings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed taxonomy of structural defects reported by validators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    Corrupt,
    Truncated,
    DecodeError,
    StreamError,
    Other,
}

impl WarningKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Corrupt => "corrupt",
            Self::Truncated => "truncated",
            Self::DecodeError => "decode_error",
            Self::StreamError => "stream_error",
            Self::Other => "other",
        }
    }

    /// Parse the configuration name of a kind
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "corrupt" => Some(Self::Corrupt),
            "truncated" => Some(Self::Truncated),
            "decode_error" => Some(Self::DecodeError),
            "stream_error" => Some(Self::StreamError),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified validator diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
