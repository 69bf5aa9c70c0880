//! Batch report, summaries and exit status

use crate::checksum::ChecksumMode;
use crate::outcome::{Counts, FileOutcome};
use crate::RunPhases;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Exit status of a run with at least one failure
pub const EXIT_FAILURE: i32 = 15;

/// Exit status of a clean run
pub const EXIT_SUCCESS: i32 = 0;

/// Aggregated result of one run, in input order
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub operation_id: String,
    /// Checksum behaviour actually applied (after confirmation)
    pub mode: ChecksumMode,
    pub phases: RunPhases,
    pub outcomes: Vec<FileOutcome>,
    pub counts: Counts,
}

impl BatchReport {
    #[must_use]
    pub fn new(
        operation_id: String,
        mode: ChecksumMode,
        phases: RunPhases,
        outcomes: Vec<FileOutcome>,
    ) -> Self {
        let counts = outcomes.iter().collect();
        Self {
            operation_id,
            mode,
            phases,
            outcomes,
            counts,
        }
    }

    #[must_use]
    pub fn failed(&self) -> bool {
        self.counts.failed()
    }

    /// 0 when every file passed, 15 otherwise
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.failed() {
            EXIT_FAILURE
        } else {
            EXIT_SUCCESS
        }
    }

    /// Per-file report lines, file by file in input order
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.outcomes.iter().flat_map(FileOutcome::lines)
    }

    /// Closing line of the run, if there is one
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        if self.phases.checksum() {
            match self.mode {
                ChecksumMode::Add => {
                    return Some(format!("Added {} checksums", self.counts.added));
                }
                ChecksumMode::Force => {
                    return Some(format!(
                        "Updated {} checksums, added {}",
                        self.counts.updated, self.counts.added
                    ));
                }
                ChecksumMode::Verify if !self.failed() => {
                    return Some("All checksums successfully verified".to_string());
                }
                ChecksumMode::Verify => return None,
            }
        }

        (!self.failed()).then(|| "All integrity checks passed".to_string())
    }
}

/// One line of a checksum export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEntry {
    pub checksum: String,
    pub path: PathBuf,
}

impl fmt::Display for ExportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} *{}", self.checksum, self.path.display())
    }
}

/// Availability of one validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStatus {
    pub media_type: String,
    pub tool: String,
    pub available: bool,
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.available { "found" } else { "not found" };
        write!(f, "{:<15} {state}", self.tool)
    }
}
