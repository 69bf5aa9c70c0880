//! Driving the per-file pipeline over a batch of items

use crate::checksum::{self, ChecksumMode};
use crate::mode::{CheckOptions, RunPhases};
use crate::outcome::{ChecksumFailure, FileOutcome, ToolError};
use crate::report::{BatchReport, ExportEntry, ToolStatus};
use bitcheck_errors::{CheckError, Error, UserFacingError, ValidatorError};
use bitcheck_events::{
    AppEvent, CheckEvent, EventEmitter, EventMessage, EventSender, FailureContext, ItemVerdict,
};
use bitcheck_library::{ItemStore, Selector};
use bitcheck_types::{Item, WarningKind};
use bitcheck_validate::{SearchPath, ToolRegistry, ToolRunner};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Question asked before stored checksums are overwritten
pub const OVERWRITE_PROMPT: &str = "Do you want to overwrite all checksums in your library?";

struct RunContext<'a> {
    operation_id: &'a str,
    mode: ChecksumMode,
    phases: RunPhases,
    ignore: &'a [WarningKind],
}

/// Verification engine over an item store
pub struct Orchestrator {
    store: Arc<dyn ItemStore>,
    registry: Arc<ToolRegistry>,
    runner: Arc<dyn ToolRunner>,
    tx: Option<EventSender>,
}

impl EventEmitter for Orchestrator {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn ItemStore>,
        registry: Arc<ToolRegistry>,
        runner: Arc<dyn ToolRunner>,
    ) -> Self {
        Self {
            store,
            registry,
            runner,
            tx: None,
        }
    }

    /// Report progress on `tx`
    #[must_use]
    pub fn with_events(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Check every item matching `selector`
    ///
    /// `confirm` is called at most once, before any checksum is written, and
    /// only for an update run that would overwrite at least one stored
    /// checksum. Declining turns the run into a plain verification.
    ///
    /// Per-file problems end up in the report; only failing to enumerate the
    /// items is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot list the selected items.
    pub async fn run<F>(
        &self,
        selector: &Selector,
        options: &CheckOptions,
        confirm: F,
    ) -> Result<BatchReport, Error>
    where
        F: FnOnce(&str) -> bool,
    {
        let start = Instant::now();
        let operation_id = Uuid::new_v4().to_string();

        let items = match self.store.items(selector).await {
            Ok(items) => items,
            Err(e) => {
                self.emit(AppEvent::Check(CheckEvent::RunFailed {
                    operation_id,
                    failure: FailureContext::from_error(&e),
                }));
                return Err(e);
            }
        };

        let mode = self.resolve_mode(&operation_id, options, &items, confirm);

        self.emit_for(
            &operation_id,
            CheckEvent::RunStarted {
                operation_id: operation_id.clone(),
                mode: options.mode.as_str().to_string(),
                phases: options.phases.into(),
                items: items.len(),
            },
        );
        tracing::info!(
            operation_id = %operation_id,
            items = items.len(),
            mode = ?mode,
            phases = ?options.phases,
            "verification started"
        );

        let ctx = RunContext {
            operation_id: &operation_id,
            mode,
            phases: options.phases,
            ignore: &options.ignore,
        };

        let outcomes: Vec<FileOutcome> = stream::iter(items)
            .map(|item| self.check_item(&ctx, item))
            .buffered(options.jobs.max(1))
            .collect()
            .await;

        let report = BatchReport::new(operation_id.clone(), mode, options.phases, outcomes);
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        self.emit_for(
            &operation_id,
            CheckEvent::RunCompleted {
                operation_id: operation_id.clone(),
                checked: report.counts.checked,
                failures: report.counts.failures + report.counts.errors,
                warnings: report.counts.warnings,
                duration_ms,
            },
        );
        tracing::info!(
            operation_id = %operation_id,
            failed = report.failed(),
            duration_ms,
            "verification finished"
        );

        Ok(report)
    }

    /// Stored checksums of the selected items, in path order
    ///
    /// Items without a checksum are left out. Nothing is read from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot list the selected items.
    pub async fn export(&self, selector: &Selector) -> Result<Vec<ExportEntry>, Error> {
        let items = self.store.items(selector).await?;
        Ok(items
            .into_iter()
            .filter_map(|item| {
                item.checksum.map(|checksum| ExportEntry {
                    checksum,
                    path: item.path,
                })
            })
            .collect())
    }

    fn resolve_mode<F>(
        &self,
        operation_id: &str,
        options: &CheckOptions,
        items: &[Item],
        confirm: F,
    ) -> ChecksumMode
    where
        F: FnOnce(&str) -> bool,
    {
        if !options.phases.checksum() {
            return options.mode.resolve(false);
        }

        let overwrites = items.iter().any(Item::has_checksum);
        let confirmed = match options.mode {
            crate::RunMode::Update if overwrites => {
                let accepted = confirm(OVERWRITE_PROMPT);
                self.emit_for(operation_id, CheckEvent::OverwriteConfirmed { accepted });
                if !accepted {
                    tracing::info!("overwrite declined, verifying only");
                }
                accepted
            }
            // Nothing stored yet, so nothing to overwrite
            crate::RunMode::Update => true,
            _ => false,
        };
        options.mode.resolve(confirmed)
    }

    async fn check_item(&self, ctx: &RunContext<'_>, item: Item) -> FileOutcome {
        let mut outcome = FileOutcome::new(item);

        if ctx.phases.checksum() {
            self.checksum_phase(ctx, &mut outcome).await;
        }
        if ctx.phases.integrity() {
            self.integrity_phase(ctx, &mut outcome).await;
        }

        let verdict = match outcome.status() {
            crate::FileStatus::Failed => ItemVerdict::Failed,
            crate::FileStatus::Error => ItemVerdict::Unreadable,
            crate::FileStatus::Warned => ItemVerdict::Warned,
            crate::FileStatus::Ok | crate::FileStatus::ToolSkipped => ItemVerdict::Ok,
        };
        tracing::debug!(path = %outcome.item.path.display(), ?verdict, "item checked");
        self.emit_for(
            ctx.operation_id,
            CheckEvent::ItemChecked {
                operation_id: ctx.operation_id.to_string(),
                path: outcome.item.path.clone(),
                verdict,
                warnings: outcome.warnings.len(),
            },
        );

        outcome
    }

    async fn checksum_phase(&self, ctx: &RunContext<'_>, outcome: &mut FileOutcome) {
        let item = &outcome.item;

        let record = match checksum::decide(item, ctx.mode).await {
            Ok(Some(record)) => record,
            Ok(None) => return,
            Err(Error::Check(CheckError::ChecksumMismatch {
                stored, computed, ..
            })) => {
                tracing::warn!(path = %item.path.display(), "checksum mismatch");
                outcome.failure = Some(ChecksumFailure::Mismatch { stored, computed });
                return;
            }
            Err(e) => {
                let message = e
                    .os_message()
                    .map_or_else(|| e.user_message().into_owned(), str::to_string);
                outcome.failure = Some(ChecksumFailure::Unreadable { message });
                return;
            }
        };

        if let (true, Some(digest)) = (record.action.writes(), record.digest.as_ref()) {
            match self.store.save_checksum(item, digest).await {
                Ok(()) => {
                    let action = match record.action {
                        checksum::ChecksumAction::Updated => {
                            bitcheck_events::ChecksumAction::Updated
                        }
                        _ => bitcheck_events::ChecksumAction::Added,
                    };
                    self.emit_for(
                        ctx.operation_id,
                        CheckEvent::ChecksumWritten {
                            path: item.path.clone(),
                            action,
                        },
                    );
                }
                Err(e) => {
                    tracing::warn!(path = %item.path.display(), error = %e, "failed to store checksum");
                    outcome.failure = Some(ChecksumFailure::StoreFailed {
                        message: e.user_message().into_owned(),
                    });
                }
            }
        }

        outcome.checksum = Some(record);
    }

    async fn integrity_phase(&self, ctx: &RunContext<'_>, outcome: &mut FileOutcome) {
        let item = &outcome.item;
        let Some(spec) = self.registry.lookup(item.media_type) else {
            return;
        };

        match self.runner.run(spec, &item.path).await {
            Ok(raw) => {
                tracing::debug!(tool = %spec.tool, status = ?raw.status, "validator finished");
                outcome.warnings = self
                    .registry
                    .classify(item.media_type, &raw.output)
                    .into_iter()
                    .filter(|w| !ctx.ignore.contains(&w.kind))
                    .collect();
            }
            Err(e) => {
                let reason = tool_reason(&e);
                tracing::warn!(tool = %spec.tool, path = %item.path.display(), %reason, "validator skipped");
                self.emit_for(
                    ctx.operation_id,
                    CheckEvent::ValidatorSkipped {
                        path: item.path.clone(),
                        tool: spec.tool.clone(),
                        reason: reason.clone(),
                    },
                );
                outcome.tool_error = Some(ToolError {
                    tool: spec.tool.clone(),
                    reason,
                });
            }
        }
    }

    fn emit_for(&self, operation_id: &str, event: CheckEvent) {
        self.emit_message(EventMessage::new(AppEvent::Check(event)).with_correlation_id(operation_id));
    }
}

/// Availability of every registered validator, ordered by media type
#[must_use]
pub fn list_validators(registry: &ToolRegistry, search_path: &SearchPath) -> Vec<ToolStatus> {
    registry
        .specs()
        .map(|spec| ToolStatus {
            media_type: spec.media_type.to_string(),
            tool: spec.tool.clone(),
            available: registry.is_available(spec, search_path),
        })
        .collect()
}

fn tool_reason(error: &Error) -> String {
    match error {
        Error::Validator(ValidatorError::ToolUnavailable { .. }) => "not found".to_string(),
        Error::Validator(ValidatorError::TimedOut { seconds, .. }) => {
            format!("timed out after {seconds}s")
        }
        Error::Validator(ValidatorError::SpawnFailed { message, .. }) => message.clone(),
        other => other.user_message().into_owned(),
    }
}
