//! Integration tests for events

#[cfg(test)]
mod tests {
    use bitcheck_events::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_event_sender_emit() {
        let (tx, mut rx) = channel();

        tx.emit_warning_with_context("could not ask", "not a terminal");
        tx.emit(AppEvent::General(GeneralEvent::UserConfirmationReceived {
            response: false,
        }));

        let first = rx.recv().await.unwrap();
        match &first.event {
            AppEvent::General(GeneralEvent::Warning { message, context }) => {
                assert_eq!(message, "could not ask");
                assert_eq!(context.as_deref(), Some("not a terminal"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(first.meta.level, EventLevel::Warn);
        assert_eq!(first.meta.source, EventSource::GENERAL);

        let second = rx.recv().await.unwrap();
        assert!(matches!(
            second.event,
            AppEvent::General(GeneralEvent::UserConfirmationReceived { response: false })
        ));
        assert_ne!(first.meta.event_id, second.meta.event_id);
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit_warning_with_context("ignored", "no receiver");
    }

    #[test]
    fn test_silent_emitter() {
        let none: Option<EventSender> = None;
        none.emit_warning_with_context("nobody listens", "silent");
        assert!(none.event_sender().is_none());
    }

    #[tokio::test]
    async fn test_correlation_id_is_carried() {
        let (tx, mut rx) = channel();
        tx.emit_message(
            EventMessage::new(AppEvent::Check(CheckEvent::OverwriteConfirmed {
                accepted: true,
            }))
            .with_correlation_id("run-1"),
        );

        let message = rx.recv().await.unwrap();
        assert_eq!(message.meta.correlation_id.as_deref(), Some("run-1"));
        assert_eq!(message.meta.source, EventSource::CHECK);
    }

    #[test]
    fn test_item_verdict_drives_log_level() {
        let failed = AppEvent::Check(CheckEvent::ItemChecked {
            operation_id: "op".into(),
            path: PathBuf::from("/music/a.mp3"),
            verdict: ItemVerdict::Failed,
            warnings: 0,
        });
        assert_eq!(failed.log_level(), tracing::Level::WARN);

        let ok = AppEvent::Check(CheckEvent::ItemChecked {
            operation_id: "op".into(),
            path: PathBuf::from("/music/a.mp3"),
            verdict: ItemVerdict::Ok,
            warnings: 0,
        });
        assert_eq!(ok.log_level(), tracing::Level::DEBUG);
        assert_eq!(ok.log_target(), "bitcheck::events::check");
    }

    #[test]
    fn test_event_serialization() {
        let event = AppEvent::Check(CheckEvent::ChecksumWritten {
            path: PathBuf::from("/music/a.flac"),
            action: ChecksumAction::Added,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["domain"], "check");
        assert_eq!(json["event"]["type"], "checksum_written");
        assert_eq!(json["event"]["action"], "added");
    }
}
