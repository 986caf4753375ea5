//! Structured logging integration for events
//!
//! Mirrors every domain event into tracing with structured fields, so a
//! `--debug` log file carries the full run even though the console only shows
//! the curated status lines.

use dockyard_events::{AppEvent, EventMessage, InstallEvent, PlatformEvent};
use tracing::{debug, error, info, warn};

/// Log an `EventMessage` using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let event = &message.event;
    let meta = &message.meta;
    let log_target = event.log_target();

    match event {
        AppEvent::Install(install_event) => match install_event {
            InstallEvent::Started {
                name,
                bundle,
                version,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    log_target,
                    name = %name,
                    bundle = %bundle.display(),
                    version = %version,
                    "Install started"
                );
            }
            InstallEvent::Completed {
                name,
                version,
                install_root,
                duration_ms,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    log_target,
                    name = %name,
                    version = %version,
                    install_root = %install_root.display(),
                    duration_ms,
                    "Install completed"
                );
            }
            InstallEvent::Failed {
                name,
                step,
                failure,
            } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    log_target,
                    name = %name,
                    step = step.as_str(),
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Install failed"
                );
            }
            other => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    log_target,
                    event = ?other,
                    "Install event"
                );
            }
        },

        AppEvent::Platform(platform_event) => match platform_event {
            PlatformEvent::OperationStarted { context } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    log_target,
                    kind = ?context.kind,
                    operation = %context.operation,
                    target_path = ?context.target,
                    command = ?context.command.as_ref().map(|c| &c.program),
                    "Platform operation started"
                );
            }
            PlatformEvent::OperationCompleted { context, metrics } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    log_target,
                    kind = ?context.kind,
                    operation = %context.operation,
                    target_path = ?context.target,
                    duration_ms = ?metrics.as_ref().and_then(|m| m.duration_ms),
                    exit_code = ?metrics.as_ref().and_then(|m| m.exit_code),
                    "Platform operation completed"
                );
            }
            PlatformEvent::OperationFailed {
                context, failure, ..
            } => {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    log_target,
                    kind = ?context.kind,
                    operation = %context.operation,
                    target_path = ?context.target,
                    code = ?failure.code,
                    message = %failure.message,
                    "Platform operation failed"
                );
            }
        },

        AppEvent::GitConfig(git_event) => {
            info!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                log_target,
                event = ?git_event,
                "Git config event"
            );
        }

        AppEvent::General(general_event) => match meta.tracing_level() {
            tracing::Level::ERROR => {
                error!(source = meta.source.as_str(), event_id = %meta.event_id, correlation = ?meta.correlation_id, event = ?general_event, "General event");
            }
            tracing::Level::WARN => {
                warn!(source = meta.source.as_str(), event_id = %meta.event_id, correlation = ?meta.correlation_id, event = ?general_event, "General event");
            }
            tracing::Level::INFO => {
                info!(source = meta.source.as_str(), event_id = %meta.event_id, correlation = ?meta.correlation_id, event = ?general_event, "General event");
            }
            _ => {
                debug!(source = meta.source.as_str(), event_id = %meta.event_id, correlation = ?meta.correlation_id, event = ?general_event, "General event");
            }
        },
    }
}
