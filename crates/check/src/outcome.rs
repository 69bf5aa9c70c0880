//! Per-file results and their aggregation

use crate::checksum::{ChecksumAction, ChecksumRecord};
use bitcheck_types::{Item, Warning};
use serde::Serialize;

/// Why the checksum phase failed for a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChecksumFailure {
    /// Content no longer matches the stored checksum
    Mismatch { stored: String, computed: String },
    /// The file could not be read; `message` is the OS error text
    Unreadable { message: String },
    /// A new checksum was computed but could not be stored
    StoreFailed { message: String },
}

/// A validator that should have run but did not
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolError {
    pub tool: String,
    pub reason: String,
}

/// Everything learned about one file in one run
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub item: Item,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<ChecksumRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ChecksumFailure>,
    /// Integrity warnings in validator output order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_error: Option<ToolError>,
}

impl FileOutcome {
    #[must_use]
    pub fn new(item: Item) -> Self {
        Self {
            item,
            checksum: None,
            failure: None,
            warnings: Vec::new(),
            tool_error: None,
        }
    }

    /// Collapse the outcome into a single tag
    #[must_use]
    pub fn status(&self) -> FileStatus {
        match &self.failure {
            Some(ChecksumFailure::Mismatch { .. }) => FileStatus::Failed,
            Some(ChecksumFailure::Unreadable { .. } | ChecksumFailure::StoreFailed { .. }) => {
                FileStatus::Error
            }
            None if !self.warnings.is_empty() => FileStatus::Warned,
            None if self.tool_error.is_some() => FileStatus::ToolSkipped,
            None => FileStatus::Ok,
        }
    }

    /// Report lines for this file, in display order
    ///
    /// A skipped validator produces no line of its own.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let path = self.item.path.display();
        let mut lines = Vec::new();

        match &self.failure {
            Some(ChecksumFailure::Mismatch { .. }) => lines.push(format!("FAILED: {path}")),
            Some(
                ChecksumFailure::Unreadable { message } | ChecksumFailure::StoreFailed { message },
            ) => lines.push(format!("ERROR {message}: {path}")),
            None => {}
        }

        for warning in &self.warnings {
            lines.push(format!("WARNING {}: {path}", warning.message));
        }

        lines
    }
}

/// Tagged per-file verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Ok,
    /// Checksum mismatch
    Failed,
    /// Unreadable file or failed store write
    Error,
    /// At least one unfiltered integrity warning
    Warned,
    /// Validator could not be run; informational
    ToolSkipped,
}

/// Totals over a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub checked: usize,
    pub failures: usize,
    pub errors: usize,
    /// Files with at least one warning
    pub warned: usize,
    /// Individual warnings
    pub warnings: usize,
    pub tools_skipped: usize,
    pub added: usize,
    pub updated: usize,
}

impl Counts {
    /// Fold one outcome into the totals
    #[must_use]
    pub fn record(mut self, outcome: &FileOutcome) -> Self {
        self.checked += 1;
        self.warnings += outcome.warnings.len();
        if outcome.tool_error.is_some() {
            self.tools_skipped += 1;
        }

        // Only writes that reached the store are counted
        if outcome.failure.is_none() {
            match outcome.checksum.as_ref().map(|r| r.action) {
                Some(ChecksumAction::Added) => self.added += 1,
                Some(ChecksumAction::Updated) => self.updated += 1,
                Some(ChecksumAction::Unchanged) | None => {}
            }
        }

        match outcome.status() {
            FileStatus::Failed => self.failures += 1,
            FileStatus::Error => self.errors += 1,
            FileStatus::Warned => self.warned += 1,
            FileStatus::Ok | FileStatus::ToolSkipped => {}
        }
        // A failed file may still carry warnings
        if outcome.failure.is_some() && !outcome.warnings.is_empty() {
            self.warned += 1;
        }
        self
    }

    /// Whether the batch counts as failed
    #[must_use]
    pub fn failed(&self) -> bool {
        self.failures > 0 || self.errors > 0 || self.warned > 0
    }
}

impl<'a> FromIterator<&'a FileOutcome> for Counts {
    fn from_iter<T: IntoIterator<Item = &'a FileOutcome>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), Counts::record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcheck_types::WarningKind;

    fn outcome() -> FileOutcome {
        FileOutcome::new(Item::new(1, "/m/a.mp3"))
    }

    #[test]
    fn test_status_precedence() {
        let mut o = outcome();
        assert_eq!(o.status(), FileStatus::Ok);

        o.tool_error = Some(ToolError {
            tool: "mp3val".into(),
            reason: "not found".into(),
        });
        assert_eq!(o.status(), FileStatus::ToolSkipped);

        o.warnings.push(Warning::new(WarningKind::Corrupt, "bad"));
        assert_eq!(o.status(), FileStatus::Warned);

        o.failure = Some(ChecksumFailure::Mismatch {
            stored: "a".into(),
            computed: "b".into(),
        });
        assert_eq!(o.status(), FileStatus::Failed);
    }

    #[test]
    fn test_lines_order_and_format() {
        let mut o = outcome();
        o.failure = Some(ChecksumFailure::Unreadable {
            message: "No such file or directory (os error 2)".into(),
        });
        o.warnings.push(Warning::new(WarningKind::Truncated, "cut short"));
        o.warnings.push(Warning::new(WarningKind::Truncated, "cut short"));

        assert_eq!(
            o.lines(),
            vec![
                "ERROR No such file or directory (os error 2): /m/a.mp3".to_string(),
                "WARNING cut short: /m/a.mp3".to_string(),
                "WARNING cut short: /m/a.mp3".to_string(),
            ]
        );
    }

    #[test]
    fn test_tool_skips_never_fail() {
        let mut o = outcome();
        o.tool_error = Some(ToolError {
            tool: "flac".into(),
            reason: "not found".into(),
        });
        assert!(o.lines().is_empty());
        let counts: Counts = [&o, &outcome()].into_iter().collect();
        assert_eq!(counts.checked, 2);
        assert_eq!(counts.tools_skipped, 1);
        assert!(!counts.failed());
    }
}
