//! Event handling and progress display

use crate::logging::log_event_with_tracing;
use bitcheck_events::{AppEvent, CheckEvent, EventMessage, GeneralEvent, LibraryEvent};
use console::Term;

/// Renders progress on stderr and forwards every event to tracing
pub struct EventHandler {
    term: Term,
    /// Draw the progress line (stderr is a terminal and not quiet)
    progress: bool,
    /// Print general warnings on stderr
    verbose: bool,
    total: usize,
    done: usize,
}

impl EventHandler {
    pub fn new(progress: bool, verbose: bool) -> Self {
        let term = Term::stderr();
        Self {
            progress: progress && term.is_term(),
            term,
            verbose,
            total: 0,
            done: 0,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, message: EventMessage) {
        log_event_with_tracing(&message);

        match message.event {
            AppEvent::Check(CheckEvent::RunStarted { items, .. }) => {
                self.total = items;
                self.done = 0;
            }
            AppEvent::Check(CheckEvent::ItemChecked { path, .. }) => {
                self.done += 1;
                self.show_progress(&format!(
                    "[{}/{}] {}",
                    self.done,
                    self.total,
                    path.display()
                ));
            }
            AppEvent::Check(CheckEvent::RunCompleted { .. } | CheckEvent::RunFailed { .. }) => {
                self.clear_progress();
            }
            AppEvent::Library(LibraryEvent::ItemImported { path, .. }) => {
                self.show_progress(&format!("Importing {}", path.display()));
            }
            AppEvent::Library(LibraryEvent::ImportCompleted { .. }) => {
                self.clear_progress();
            }
            AppEvent::General(GeneralEvent::Warning { message, context }) if self.verbose => {
                self.clear_progress();
                match context {
                    Some(context) => eprintln!("Warning: {message} ({context})"),
                    None => eprintln!("Warning: {message}"),
                }
            }
            _ => {}
        }
    }

    fn show_progress(&self, line: &str) {
        if !self.progress {
            return;
        }
        let width = usize::from(self.term.size().1);
        let line = console::truncate_str(line, width.saturating_sub(1), "…");
        let _ = self.term.clear_line();
        let _ = self.term.write_str(&line);
    }

    fn clear_progress(&self) {
        if self.progress {
            let _ = self.term.clear_line();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcheck_events::{CheckPhases, ItemVerdict};
    use std::path::PathBuf;

    #[test]
    fn test_counts_checked_items() {
        let mut handler = EventHandler::new(false, false);

        handler.handle_event(EventMessage::new(AppEvent::Check(CheckEvent::RunStarted {
            operation_id: "op".into(),
            mode: "verify".into(),
            phases: CheckPhases::Both,
            items: 2,
        })));
        for name in ["a.mp3", "b.mp3"] {
            handler.handle_event(EventMessage::new(AppEvent::Check(
                CheckEvent::ItemChecked {
                    operation_id: "op".into(),
                    path: PathBuf::from(name),
                    verdict: ItemVerdict::Ok,
                    warnings: 0,
                },
            )));
        }

        assert_eq!(handler.done, 2);
        assert_eq!(handler.total, 2);
    }
}
