//! Integration tests for events

#[cfg(test)]
mod tests {
    use dockyard_events::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_event_sender_emitter() {
        let (tx, mut rx) = channel();

        tx.emit_error("test error");
        tx.emit_debug("test debug");

        let first = rx.recv().await.unwrap();
        assert!(matches!(
            first.event,
            AppEvent::General(GeneralEvent::Error { .. })
        ));
        assert_eq!(first.meta.level, EventLevel::Error);

        let second = rx.recv().await.unwrap();
        assert!(matches!(
            second.event,
            AppEvent::General(GeneralEvent::DebugLog { .. })
        ));
        assert_eq!(second.meta.level, EventLevel::Debug);
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit_warning("ignored");
    }

    #[test]
    fn test_event_source_follows_domain() {
        let event = AppEvent::Install(InstallEvent::LauncherWritten {
            path: PathBuf::from("/home/u/.local/bin/app-launch"),
        });
        assert_eq!(event.event_source(), EventSource::INSTALL);
        assert_eq!(event.log_target(), "dockyard::events::install");
        assert_eq!(event.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_install_step_serialization() {
        let json = serde_json::to_string(&InstallStep::SandboxHelper).unwrap();
        assert_eq!(json, r#""sandbox_helper""#);
        assert_eq!(InstallStep::SandboxHelper.as_str(), "sandbox_helper");
    }

    struct Tagged {
        tx: EventSender,
    }

    impl EventEmitter for Tagged {
        fn event_sender(&self) -> Option<&EventSender> {
            Some(&self.tx)
        }

        fn correlation_id(&self) -> Option<&str> {
            Some("run-1")
        }
    }

    #[tokio::test]
    async fn test_correlation_id_is_attached() {
        let (tx, mut rx) = channel();
        let emitter = Tagged { tx };
        emitter.emit_notice("hello");

        let message = rx.recv().await.unwrap();
        assert_eq!(message.meta.correlation_id.as_deref(), Some("run-1"));
        assert_eq!(message.meta.source, EventSource::GENERAL);
    }
}
