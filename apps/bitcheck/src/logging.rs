//! Structured logging integration for events
//!
//! Every event that reaches the CLI is also recorded through `tracing`, with
//! the emission metadata as structured fields, so `--debug` log files carry
//! the full run history.

use bitcheck_events::{AppEvent, CheckEvent, EventMessage, GeneralEvent, LibraryEvent};
use tracing::{debug, error, info, trace, warn};

/// Log an `AppEvent` at the level recorded in its metadata
pub fn log_event_with_tracing(message: &EventMessage) {
    let event = &message.event;
    let meta = &message.meta;

    match event {
        AppEvent::Check(check_event) => match check_event {
            CheckEvent::RunStarted {
                operation_id,
                mode,
                phases,
                items,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    operation_id = %operation_id,
                    mode = %mode,
                    phases = ?phases,
                    items,
                    "Check run started"
                );
            }
            CheckEvent::ItemChecked {
                path,
                verdict,
                warnings,
                ..
            } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    path = %path.display(),
                    verdict = ?verdict,
                    warnings,
                    "Item checked"
                );
            }
            CheckEvent::ChecksumWritten { path, action } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    path = %path.display(),
                    action = ?action,
                    "Checksum written"
                );
            }
            CheckEvent::ValidatorSkipped { path, tool, reason } => {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    path = %path.display(),
                    tool = %tool,
                    reason = %reason,
                    "Validator skipped"
                );
            }
            CheckEvent::OverwriteConfirmed { accepted } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    accepted,
                    "Overwrite confirmation"
                );
            }
            CheckEvent::RunCompleted {
                operation_id,
                checked,
                failures,
                warnings,
                duration_ms,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    operation_id = %operation_id,
                    checked,
                    failures,
                    warnings,
                    duration_ms,
                    "Check run completed"
                );
            }
            CheckEvent::RunFailed {
                operation_id,
                failure,
            } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    operation_id = %operation_id,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Check run failed"
                );
            }
        },

        AppEvent::Library(library_event) => match library_event {
            LibraryEvent::ImportFailed { root, failure } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    root = %root.display(),
                    code = ?failure.code,
                    message = %failure.message,
                    "Import failed"
                );
            }
            LibraryEvent::ImportCompleted {
                root,
                added,
                skipped,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    root = %root.display(),
                    added,
                    skipped,
                    "Import completed"
                );
            }
            other => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    event = ?other,
                    "Library event"
                );
            }
        },

        AppEvent::General(general_event) => match general_event {
            GeneralEvent::Warning { message, context } => {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    message = %message,
                    context = ?context,
                    "Warning"
                );
            }
            _ => match meta.tracing_level() {
                tracing::Level::ERROR => {
                    error!(source = meta.source.as_str(), event_id = %meta.event_id, event = ?general_event, "General event");
                }
                tracing::Level::WARN => {
                    warn!(source = meta.source.as_str(), event_id = %meta.event_id, event = ?general_event, "General event");
                }
                tracing::Level::INFO => {
                    info!(source = meta.source.as_str(), event_id = %meta.event_id, event = ?general_event, "General event");
                }
                tracing::Level::DEBUG => {
                    debug!(source = meta.source.as_str(), event_id = %meta.event_id, event = ?general_event, "General event");
                }
                tracing::Level::TRACE => {
                    trace!(source = meta.source.as_str(), event_id = %meta.event_id, event = ?general_event, "General event");
                }
            },
        },
    }
}
