//! Linux filesystem operations implementation
//!
//! Thin wrappers over `tokio::fs` that translate I/O errors into
//! `PlatformError` and report each mutation as platform events.

use async_trait::async_trait;
use dockyard_errors::PlatformError;
use dockyard_events::{
    events::{
        FailureContext, PlatformEvent, PlatformOperationContext, PlatformOperationKind,
        PlatformOperationMetrics,
    },
    AppEvent,
};
use std::future::Future;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::core::PlatformContext;
use crate::filesystem::FilesystemOperations;

/// Linux implementation of filesystem operations
pub struct LinuxFilesystemOperations;

impl LinuxFilesystemOperations {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinuxFilesystemOperations {
    fn default() -> Self {
        Self::new()
    }
}

fn filesystem_context(
    operation: &str,
    source: Option<&Path>,
    target: &Path,
) -> PlatformOperationContext {
    PlatformOperationContext {
        kind: PlatformOperationKind::Filesystem,
        operation: operation.to_string(),
        target: Some(target.to_path_buf()),
        source: source.map(Path::to_path_buf),
        command: None,
    }
}

fn filesystem_metrics(duration: Duration) -> PlatformOperationMetrics {
    PlatformOperationMetrics {
        duration_ms: Some(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)),
        ..PlatformOperationMetrics::default()
    }
}

fn io_failure(operation: &str, path: &Path, err: &std::io::Error) -> PlatformError {
    if err.kind() == std::io::ErrorKind::PermissionDenied {
        PlatformError::PermissionDenied {
            operation: operation.to_string(),
            message: format!("{}: {err}", path.display()),
        }
    } else {
        PlatformError::FilesystemOperationFailed {
            operation: operation.to_string(),
            message: format!("{}: {err}", path.display()),
        }
    }
}

/// Run `op` bracketed by started and completed/failed events
async fn instrumented<T, F>(
    ctx: &PlatformContext,
    operation: &str,
    source: Option<&Path>,
    target: &Path,
    op: F,
) -> Result<T, PlatformError>
where
    F: Future<Output = Result<T, PlatformError>>,
{
    let start = Instant::now();
    ctx.emit_event(AppEvent::Platform(PlatformEvent::OperationStarted {
        context: filesystem_context(operation, source, target),
    }));

    let result = op.await;
    let metrics = Some(filesystem_metrics(start.elapsed()));

    match &result {
        Ok(_) => ctx.emit_event(AppEvent::Platform(PlatformEvent::OperationCompleted {
            context: filesystem_context(operation, source, target),
            metrics,
        })),
        Err(e) => {
            tracing::debug!(operation, target = %target.display(), error = %e, "filesystem operation failed");
            ctx.emit_event(AppEvent::Platform(PlatformEvent::OperationFailed {
                context: filesystem_context(operation, source, target),
                failure: FailureContext::from_error(e),
                metrics,
            }));
        }
    }

    result
}

/// Recursive tree copy; symlinks are recreated with their original content
async fn copy_tree(src: &Path, dst: &Path) -> Result<(), PlatformError> {
    let metadata = fs::metadata(src)
        .await
        .map_err(|e| io_failure("copy_dir_all", src, &e))?;
    fs::create_dir_all(dst)
        .await
        .map_err(|e| io_failure("copy_dir_all", dst, &e))?;

    let mut entries = fs::read_dir(src)
        .await
        .map_err(|e| io_failure("copy_dir_all", src, &e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| io_failure("copy_dir_all", src, &e))?
    {
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| io_failure("copy_dir_all", &from, &e))?;

        if file_type.is_symlink() {
            let target = fs::read_link(&from)
                .await
                .map_err(|e| io_failure("copy_dir_all", &from, &e))?;
            fs::symlink(&target, &to)
                .await
                .map_err(|e| io_failure("copy_dir_all", &to, &e))?;
        } else if file_type.is_dir() {
            Box::pin(copy_tree(&from, &to)).await?;
        } else {
            // fs::copy carries the permission bits over
            fs::copy(&from, &to)
                .await
                .map_err(|e| io_failure("copy_dir_all", &to, &e))?;
        }
    }

    // directory modes last so read-only directories do not block the copy
    fs::set_permissions(dst, metadata.permissions())
        .await
        .map_err(|e| io_failure("copy_dir_all", dst, &e))
}

#[async_trait]
impl FilesystemOperations for LinuxFilesystemOperations {
    async fn create_dir_all(
        &self,
        ctx: &PlatformContext,
        path: &Path,
    ) -> Result<(), PlatformError> {
        instrumented(ctx, "create_dir_all", None, path, async {
            fs::create_dir_all(path)
                .await
                .map_err(|e| io_failure("create_dir_all", path, &e))
        })
        .await
    }

    async fn remove_dir_all(
        &self,
        ctx: &PlatformContext,
        path: &Path,
    ) -> Result<(), PlatformError> {
        instrumented(ctx, "remove_dir_all", None, path, async {
            fs::remove_dir_all(path)
                .await
                .map_err(|e| io_failure("remove_dir_all", path, &e))
        })
        .await
    }

    async fn remove_file(&self, ctx: &PlatformContext, path: &Path) -> Result<(), PlatformError> {
        instrumented(ctx, "remove_file", None, path, async {
            fs::remove_file(path)
                .await
                .map_err(|e| io_failure("remove_file", path, &e))
        })
        .await
    }

    async fn exists(&self, _ctx: &PlatformContext, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    async fn is_dir(&self, _ctx: &PlatformContext, path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|m| m.is_dir())
    }

    async fn is_symlink(&self, _ctx: &PlatformContext, path: &Path) -> bool {
        fs::symlink_metadata(path)
            .await
            .is_ok_and(|m| m.file_type().is_symlink())
    }

    async fn copy_file(
        &self,
        ctx: &PlatformContext,
        src: &Path,
        dst: &Path,
    ) -> Result<(), PlatformError> {
        instrumented(ctx, "copy_file", Some(src), dst, async {
            fs::copy(src, dst)
                .await
                .map(|_| ())
                .map_err(|e| io_failure("copy_file", src, &e))
        })
        .await
    }

    async fn copy_dir_all(
        &self,
        ctx: &PlatformContext,
        src: &Path,
        dst: &Path,
    ) -> Result<(), PlatformError> {
        instrumented(ctx, "copy_dir_all", Some(src), dst, copy_tree(src, dst)).await
    }

    async fn set_mode(
        &self,
        ctx: &PlatformContext,
        path: &Path,
        mode: u32,
    ) -> Result<(), PlatformError> {
        instrumented(ctx, "set_mode", None, path, async {
            fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
                .await
                .map_err(|e| io_failure("set_mode", path, &e))
        })
        .await
    }

    async fn symlink(
        &self,
        ctx: &PlatformContext,
        target: &Path,
        link: &Path,
    ) -> Result<(), PlatformError> {
        instrumented(ctx, "symlink", Some(target), link, async {
            fs::symlink(target, link)
                .await
                .map_err(|e| io_failure("symlink", link, &e))
        })
        .await
    }

    async fn write_file(
        &self,
        ctx: &PlatformContext,
        path: &Path,
        contents: &[u8],
    ) -> Result<(), PlatformError> {
        instrumented(ctx, "write_file", None, path, async {
            fs::write(path, contents)
                .await
                .map_err(|e| io_failure("write_file", path, &e))
        })
        .await
    }

    async fn append_file(
        &self,
        ctx: &PlatformContext,
        path: &Path,
        contents: &[u8],
    ) -> Result<(), PlatformError> {
        instrumented(ctx, "append_file", None, path, async {
            let mut file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .await
                .map_err(|e| io_failure("append_file", path, &e))?;
            file.write_all(contents)
                .await
                .map_err(|e| io_failure("append_file", path, &e))?;
            file.flush()
                .await
                .map_err(|e| io_failure("append_file", path, &e))
        })
        .await
    }

    async fn read_to_string(
        &self,
        _ctx: &PlatformContext,
        path: &Path,
    ) -> Result<String, PlatformError> {
        fs::read_to_string(path)
            .await
            .map_err(|e| io_failure("read_to_string", path, &e))
    }

    async fn canonicalize(
        &self,
        _ctx: &PlatformContext,
        path: &Path,
    ) -> Result<PathBuf, PlatformError> {
        fs::canonicalize(path)
            .await
            .map_err(|e| io_failure("canonicalize", path, &e))
    }
}
