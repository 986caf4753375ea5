//! Linux process operations implementation
//!
//! Spawns children through `tokio::process`, capturing output and reporting
//! each invocation as platform events with exit code and output sizes.

use async_trait::async_trait;
use dockyard_errors::{Error, PlatformError};
use dockyard_events::{
    events::{
        FailureContext, PlatformEvent, PlatformOperationContext, PlatformOperationKind,
        PlatformOperationMetrics, ProcessCommandDescriptor,
    },
    AppEvent,
};
use std::convert::TryFrom;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::process::Command;

use crate::core::PlatformContext;
use crate::process::{CommandOutput, PlatformCommand, ProcessOperations};

/// Linux implementation of process operations
pub struct LinuxProcessOperations;

impl LinuxProcessOperations {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinuxProcessOperations {
    fn default() -> Self {
        Self::new()
    }
}

fn process_context(descriptor: ProcessCommandDescriptor) -> PlatformOperationContext {
    PlatformOperationContext {
        kind: PlatformOperationKind::Process,
        operation: "execute_command".to_string(),
        target: None,
        source: None,
        command: Some(descriptor),
    }
}

fn process_metrics(duration: Duration, output: Option<&CommandOutput>) -> PlatformOperationMetrics {
    PlatformOperationMetrics {
        duration_ms: Some(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)),
        exit_code: output.and_then(|o| o.status.code()),
        stdout_bytes: output.and_then(|o| u64::try_from(o.stdout.len()).ok()),
        stderr_bytes: output.and_then(|o| u64::try_from(o.stderr.len()).ok()),
    }
}

#[async_trait]
impl ProcessOperations for LinuxProcessOperations {
    async fn execute_command(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, Error> {
        let start = Instant::now();
        let descriptor = ProcessCommandDescriptor {
            program: cmd.program().to_string(),
            args: cmd.get_args().to_vec(),
            cwd: cmd.get_current_dir().cloned(),
        };

        ctx.emit_event(AppEvent::Platform(PlatformEvent::OperationStarted {
            context: process_context(descriptor.clone()),
        }));

        let mut command = Command::new(cmd.program());
        command.args(cmd.get_args());
        if let Some(dir) = cmd.get_current_dir() {
            command.current_dir(dir);
        }
        for (key, value) in cmd.get_env_vars() {
            command.env(key, value);
        }

        let result = command
            .output()
            .await
            .map(|output| CommandOutput {
                status: output.status,
                stdout: output.stdout,
                stderr: output.stderr,
            })
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PlatformError::CommandNotFound {
                        command: cmd.program().to_string(),
                    }
                } else {
                    PlatformError::ProcessExecutionFailed {
                        command: cmd.program().to_string(),
                        message: e.to_string(),
                    }
                }
            });

        let duration = start.elapsed();
        match &result {
            Ok(output) => {
                tracing::debug!(command = %cmd.display(), status = %output.status_label(), "command finished");
                ctx.emit_event(AppEvent::Platform(PlatformEvent::OperationCompleted {
                    context: process_context(descriptor),
                    metrics: Some(process_metrics(duration, Some(output))),
                }));
            }
            Err(e) => {
                ctx.emit_event(AppEvent::Platform(PlatformEvent::OperationFailed {
                    context: process_context(descriptor),
                    failure: FailureContext::from_error(e),
                    metrics: Some(process_metrics(duration, None)),
                }));
            }
        }

        result.map_err(Error::from)
    }

    fn create_command(&self, program: &str) -> PlatformCommand {
        PlatformCommand::new(program)
    }

    async fn which(&self, program: &str) -> Result<PathBuf, Error> {
        which::which(program).map_err(|_| {
            Error::from(PlatformError::CommandNotFound {
                command: program.to_string(),
            })
        })
    }
}
