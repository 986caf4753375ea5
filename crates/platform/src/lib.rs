//! Platform abstraction layer for Linux desktop installs.
//!
//! This crate provides a unified interface for platform-specific operations including:
//! - Filesystem operations (tree copies preserving symlinks and modes, symlinks, modes)
//! - Process execution with proper event emission and error handling
//!
//! Every operation reports `PlatformEvent`s through the [`PlatformContext`] it
//! is handed, so callers see a started/completed/failed trail without any
//! logging of their own.

pub mod core;
pub mod filesystem;
pub mod implementations;
pub mod process;

pub use core::{Platform, PlatformContext};
pub use implementations::linux::LinuxPlatform;

/// Re-export commonly used types
pub use filesystem::FilesystemOperations;
pub use process::{CommandOutput, PlatformCommand, ProcessOperations};
