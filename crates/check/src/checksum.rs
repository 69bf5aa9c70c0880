//! When a stored checksum is trusted, recomputed or written

use bitcheck_errors::{CheckError, Error};
use bitcheck_hash::Hash;
use bitcheck_types::{Item, ItemId};
use serde::Serialize;
use std::path::Path;

/// How the checksum phase treats stored values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumMode {
    /// Compare against stored values; never write
    Verify,
    /// Fill in missing checksums only
    Add,
    /// Recompute and store every checksum
    Force,
}

/// What happened to the stored checksum of one item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumAction {
    Added,
    Unchanged,
    Updated,
}

impl ChecksumAction {
    /// Whether the store must persist the new digest
    #[must_use]
    pub fn writes(self) -> bool {
        self != Self::Unchanged
    }
}

/// Result of the checksum phase for one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecksumRecord {
    pub item_id: ItemId,
    pub previous: Option<String>,
    /// Digest computed during this run; `None` if the file was not read
    pub digest: Option<Hash>,
    pub action: ChecksumAction,
}

impl ChecksumRecord {
    /// Checksum the item holds once the record is applied
    #[must_use]
    pub fn value(&self) -> Option<String> {
        self.digest
            .as_ref()
            .map(Hash::to_hex)
            .or_else(|| self.previous.clone())
    }
}

/// Digest of the file at `path`
///
/// # Errors
///
/// Returns `Error::Io` carrying the OS message if the file cannot be read.
pub async fn compute(path: &Path) -> Result<Hash, Error> {
    Hash::hash_file(path).await
}

/// Run the checksum phase for `item` under `mode`
///
/// Returns `Ok(None)` when there is nothing to do (verifying an item that
/// has no stored checksum).
///
/// # Errors
///
/// Returns `CheckError::ChecksumMismatch` when verification finds different
/// content, or `Error::Io` when the file cannot be read.
pub async fn decide(item: &Item, mode: ChecksumMode) -> Result<Option<ChecksumRecord>, Error> {
    let stored = item.checksum.as_deref();

    match (mode, stored) {
        (ChecksumMode::Verify, None) => Ok(None),
        (ChecksumMode::Add, Some(existing)) => Ok(Some(ChecksumRecord {
            item_id: item.id,
            previous: Some(existing.to_string()),
            digest: None,
            action: ChecksumAction::Unchanged,
        })),
        (ChecksumMode::Verify, Some(existing)) => {
            let digest = compute(&item.path).await?;
            if !digest.matches_hex(existing) {
                return Err(CheckError::ChecksumMismatch {
                    path: item.path.display().to_string(),
                    stored: existing.to_string(),
                    computed: digest.to_hex(),
                }
                .into());
            }
            Ok(Some(ChecksumRecord {
                item_id: item.id,
                previous: Some(existing.to_string()),
                digest: Some(digest),
                action: ChecksumAction::Unchanged,
            }))
        }
        (ChecksumMode::Add | ChecksumMode::Force, None) => {
            let digest = compute(&item.path).await?;
            Ok(Some(ChecksumRecord {
                item_id: item.id,
                previous: None,
                digest: Some(digest),
                action: ChecksumAction::Added,
            }))
        }
        (ChecksumMode::Force, Some(existing)) => {
            let digest = compute(&item.path).await?;
            let action = if digest.matches_hex(existing) {
                ChecksumAction::Unchanged
            } else {
                ChecksumAction::Updated
            };
            Ok(Some(ChecksumRecord {
                item_id: item.id,
                previous: Some(existing.to_string()),
                digest: Some(digest),
                action,
            }))
        }
    }
}
