use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Library maintenance events (imports into the item store).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LibraryEvent {
    ImportStarted {
        root: PathBuf,
    },

    ItemImported {
        path: PathBuf,
        media_type: String,
    },

    ImportCompleted {
        root: PathBuf,
        added: usize,
        skipped: usize,
    },

    ImportFailed {
        root: PathBuf,
        failure: super::FailureContext,
    },
}
