//! Registering files from disk into a store

use crate::ItemStore;
use bitcheck_errors::{Error, LibraryError};
use bitcheck_events::{AppEvent, EventEmitter, FailureContext, LibraryEvent};
use bitcheck_types::MediaType;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome of an import over one or more roots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    /// Paths that were already registered
    pub skipped: usize,
    /// Files left out because their path cannot be stored
    pub rejected: usize,
}

/// Register every file under `roots`
///
/// Directories are walked recursively and only files with a recognized media
/// extension are taken. A file named explicitly is registered whatever its
/// extension. Paths are stored in canonical absolute form.
///
/// # Errors
///
/// Returns `LibraryError::ImportFailed` if a root does not exist, or any
/// store error raised while registering. Files whose path is not valid UTF-8
/// are skipped with a warning and counted in `rejected`.
pub async fn import<S, E>(store: &S, roots: &[PathBuf], events: &E) -> Result<ImportSummary, Error>
where
    S: ItemStore + ?Sized,
    E: EventEmitter + ?Sized,
{
    let mut summary = ImportSummary::default();

    for root in roots {
        events.emit(AppEvent::Library(LibraryEvent::ImportStarted { root: root.clone() }));

        let result = import_root(store, root, events).await;
        match result {
            Ok(root_summary) => {
                summary.added += root_summary.added;
                summary.skipped += root_summary.skipped;
                summary.rejected += root_summary.rejected;
                events.emit(AppEvent::Library(LibraryEvent::ImportCompleted {
                    root: root.clone(),
                    added: root_summary.added,
                    skipped: root_summary.skipped,
                }));
            }
            Err(e) => {
                events.emit(AppEvent::Library(LibraryEvent::ImportFailed {
                    root: root.clone(),
                    failure: FailureContext::from_error(&e),
                }));
                return Err(e);
            }
        }
    }

    Ok(summary)
}

async fn import_root<S, E>(store: &S, root: &Path, events: &E) -> Result<ImportSummary, Error>
where
    S: ItemStore + ?Sized,
    E: EventEmitter + ?Sized,
{
    let canonical = tokio::fs::canonicalize(root)
        .await
        .map_err(|e| LibraryError::ImportFailed {
            path: root.display().to_string(),
            message: e.to_string(),
        })?;

    let mut summary = ImportSummary::default();
    for path in candidates(&canonical) {
        match store.register(&path).await {
            Ok(Some(item)) => {
                summary.added += 1;
                events.emit(AppEvent::Library(LibraryEvent::ItemImported {
                    path: item.path,
                    media_type: item.media_type.to_string(),
                }));
            }
            Ok(None) => summary.skipped += 1,
            Err(Error::Library(LibraryError::UnsupportedPath { path })) => {
                tracing::warn!(path = %path, "skipping file with non UTF-8 path");
                events.emit_warning_with_context("skipped file: path is not valid UTF-8", path);
                summary.rejected += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        root = %canonical.display(),
        added = summary.added,
        skipped = summary.skipped,
        rejected = summary.rejected,
        "import finished"
    );
    Ok(summary)
}

fn candidates(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        return vec![root.to_path_buf()];
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry during import");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if MediaType::from_path(entry.path()).is_known() {
            found.push(entry.into_path());
        }
    }
    found
}
