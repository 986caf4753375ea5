//! Core platform abstractions and context management

use dockyard_errors::{Error, PlatformError};
use dockyard_events::{AppEvent, EventEmitter, EventSender};

use crate::filesystem::FilesystemOperations;
use crate::process::{CommandOutput, PlatformCommand, ProcessOperations};

/// Context for platform operations: where events go and which run they belong to
#[derive(Clone, Default)]
pub struct PlatformContext {
    event_sender: Option<EventSender>,
    correlation_id: Option<String>,
}

impl PlatformContext {
    /// Create a new platform context with event emission capabilities
    #[must_use]
    pub fn new(event_sender: Option<EventSender>) -> Self {
        Self {
            event_sender,
            correlation_id: None,
        }
    }

    /// Tag every event emitted through this context with a run identifier
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Emit a platform event if event sender is available
    pub fn emit_event(&self, event: AppEvent) {
        self.emit(event);
    }
}

impl EventEmitter for PlatformContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }

    fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }
}

/// Main platform abstraction providing access to all platform operations
pub struct Platform {
    filesystem_ops: Box<dyn FilesystemOperations>,
    process_ops: Box<dyn ProcessOperations>,
}

impl Platform {
    /// Create a new platform instance with the specified implementations
    #[must_use]
    pub fn new(
        filesystem_ops: Box<dyn FilesystemOperations>,
        process_ops: Box<dyn ProcessOperations>,
    ) -> Self {
        Self {
            filesystem_ops,
            process_ops,
        }
    }

    /// Get the current platform (Linux)
    #[must_use]
    pub fn current() -> Self {
        crate::implementations::linux::LinuxPlatform::new()
    }

    /// Access filesystem operations
    #[must_use]
    pub fn filesystem(&self) -> &dyn FilesystemOperations {
        &*self.filesystem_ops
    }

    /// Access process operations
    #[must_use]
    pub fn process(&self) -> &dyn ProcessOperations {
        &*self.process_ops
    }

    /// Convenience method: Execute a command and get output
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    pub async fn execute_command(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, Error> {
        self.process().execute_command(ctx, cmd).await
    }

    /// Convenience method: Execute a command and require a zero exit status
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::CommandFailed` carrying stderr when the command
    /// exits unsuccessfully, or the spawn error when it cannot be started.
    pub async fn execute_checked(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, Error> {
        let display = cmd.display();
        let output = self.process().execute_command(ctx, cmd).await?;
        if output.success() {
            Ok(output)
        } else {
            Err(PlatformError::CommandFailed {
                command: display,
                status: output.status_label(),
                stderr: output.stderr_string(),
            }
            .into())
        }
    }

    /// Convenience method: Create a new command builder
    #[must_use]
    pub fn command(&self, program: &str) -> PlatformCommand {
        self.process().create_command(program)
    }

    /// Convenience method: Locate an executable on `PATH`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::CommandNotFound` when the program is not on `PATH`.
    pub async fn which(&self, program: &str) -> Result<std::path::PathBuf, Error> {
        self.process().which(program).await
    }
}
