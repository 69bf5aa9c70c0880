use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which verification phases a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckPhases {
    ChecksumOnly,
    IntegrityOnly,
    Both,
}

/// What a run did to a stored checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumAction {
    Added,
    Updated,
}

/// Per-file verdict carried on progress events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemVerdict {
    Ok,
    Failed,
    Unreadable,
    Warned,
}

/// Events emitted while a batch of items is verified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckEvent {
    /// A run over `items` files started.
    RunStarted {
        operation_id: String,
        mode: String,
        phases: CheckPhases,
        items: usize,
    },

    /// One file finished all of its phases.
    ItemChecked {
        operation_id: String,
        path: PathBuf,
        verdict: ItemVerdict,
        warnings: usize,
    },

    /// A checksum was persisted to the store.
    ChecksumWritten {
        path: PathBuf,
        action: ChecksumAction,
    },

    /// The validator for a file could not be run.
    ValidatorSkipped {
        path: PathBuf,
        tool: String,
        reason: String,
    },

    /// The user was asked whether stored checksums may be overwritten.
    OverwriteConfirmed { accepted: bool },

    /// The run finished.
    RunCompleted {
        operation_id: String,
        checked: usize,
        failures: usize,
        warnings: usize,
        duration_ms: u64,
    },

    /// The run aborted before completion.
    RunFailed {
        operation_id: String,
        failure: super::FailureContext,
    },
}
