//! Filesystem operations used by the installer and the config writer

use async_trait::async_trait;
use dockyard_errors::PlatformError;
use std::path::{Path, PathBuf};

use crate::core::PlatformContext;

/// Trait for filesystem operations
///
/// Mutating operations report through the context's event sender; queries
/// (`exists`, `is_dir`, `is_symlink`) are silent.
#[async_trait]
pub trait FilesystemOperations: Send + Sync {
    /// Create directory and all parent directories
    async fn create_dir_all(&self, ctx: &PlatformContext, path: &Path)
        -> Result<(), PlatformError>;

    /// Remove directory and all contents
    async fn remove_dir_all(&self, ctx: &PlatformContext, path: &Path)
        -> Result<(), PlatformError>;

    /// Remove a single file or symlink
    async fn remove_file(&self, ctx: &PlatformContext, path: &Path) -> Result<(), PlatformError>;

    /// Check if a path exists (following symlinks)
    async fn exists(&self, ctx: &PlatformContext, path: &Path) -> bool;

    /// Check if a path points to a directory.
    async fn is_dir(&self, ctx: &PlatformContext, path: &Path) -> bool;

    /// Check if a path is itself a symlink (dangling or not)
    async fn is_symlink(&self, ctx: &PlatformContext, path: &Path) -> bool;

    /// Copy a single file, carrying its permission bits
    async fn copy_file(
        &self,
        ctx: &PlatformContext,
        src: &Path,
        dst: &Path,
    ) -> Result<(), PlatformError>;

    /// Recursively copy a directory, recreating symlinks instead of following them
    async fn copy_dir_all(
        &self,
        ctx: &PlatformContext,
        src: &Path,
        dst: &Path,
    ) -> Result<(), PlatformError>;

    /// Set unix permission bits
    async fn set_mode(
        &self,
        ctx: &PlatformContext,
        path: &Path,
        mode: u32,
    ) -> Result<(), PlatformError>;

    /// Create a symlink at `link` whose content is `target` verbatim
    async fn symlink(
        &self,
        ctx: &PlatformContext,
        target: &Path,
        link: &Path,
    ) -> Result<(), PlatformError>;

    /// Create or truncate a file with the given contents
    async fn write_file(
        &self,
        ctx: &PlatformContext,
        path: &Path,
        contents: &[u8],
    ) -> Result<(), PlatformError>;

    /// Append to a file, creating it when missing
    async fn append_file(
        &self,
        ctx: &PlatformContext,
        path: &Path,
        contents: &[u8],
    ) -> Result<(), PlatformError>;

    /// Read a file as UTF-8 text
    async fn read_to_string(
        &self,
        ctx: &PlatformContext,
        path: &Path,
    ) -> Result<String, PlatformError>;

    /// Resolve symlinks and return an absolute path
    async fn canonicalize(
        &self,
        ctx: &PlatformContext,
        path: &Path,
    ) -> Result<PathBuf, PlatformError>;
}
