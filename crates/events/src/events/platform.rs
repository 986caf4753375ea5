//! Platform-specific operation events

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FailureContext;

/// Kind of platform operation being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformOperationKind {
    Filesystem,
    Process,
}

/// Command line of a spawned process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessCommandDescriptor {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

/// What a platform operation acted on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformOperationContext {
    pub kind: PlatformOperationKind,
    /// Operation name (e.g. `copy_file`, `execute_command`)
    pub operation: String,
    pub target: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub command: Option<ProcessCommandDescriptor>,
}

/// Measurements taken once an operation finished
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformOperationMetrics {
    pub duration_ms: Option<u64>,
    pub exit_code: Option<i32>,
    pub stdout_bytes: Option<u64>,
    pub stderr_bytes: Option<u64>,
}

/// Platform operation events for tracking filesystem and process operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PlatformEvent {
    OperationStarted {
        context: PlatformOperationContext,
    },
    OperationCompleted {
        context: PlatformOperationContext,
        metrics: Option<PlatformOperationMetrics>,
    },
    OperationFailed {
        context: PlatformOperationContext,
        failure: FailureContext,
        metrics: Option<PlatformOperationMetrics>,
    },
}
