use dockyard_config::BundleConfig;
use dockyard_errors::{Error, InstallError};
use dockyard_platform::{Platform, PlatformContext};
use std::path::{Path, PathBuf};

use super::fs_error;

/// Run the bundle's self-extraction and install the result as `<root>/<version>`
///
/// The bundle runs inside a fresh temporary directory that is also its
/// `TMPDIR`. The extracted tree replaces any existing version directory of
/// the same name; symlinks and permission bits are preserved. The temporary
/// directory is removed on return.
///
/// # Errors
///
/// Returns `InstallError::BundleExecutionFailed` when the bundle exits
/// unsuccessfully, `InstallError::ExtractionFailed` when it produced no
/// extracted tree, and `InstallError::FilesystemError` when installing the
/// tree fails.
pub async fn extract_bundle(
    platform: &Platform,
    ctx: &PlatformContext,
    staged: &Path,
    install_root: &Path,
    version: &str,
    bundle: &BundleConfig,
) -> Result<PathBuf, Error> {
    let temp = tempfile::Builder::new()
        .prefix("dockyard-extract-")
        .tempdir()
        .map_err(|e| InstallError::TempFileError {
            message: e.to_string(),
        })?;
    let temp_path = temp.path().to_path_buf();

    let mut cmd = platform.command(&staged.to_string_lossy());
    cmd.arg(&bundle.extract_flag)
        .current_dir(&temp_path)
        .env("TMPDIR", temp_path.to_string_lossy());

    let output = platform.execute_command(ctx, cmd).await?;
    if !output.success() {
        return Err(InstallError::BundleExecutionFailed {
            status: output.status_label(),
            message: output.stderr_string().trim().to_string(),
        }
        .into());
    }

    let fs = platform.filesystem();
    let extracted = temp_path.join(&bundle.extracted_dir);
    if !fs.is_dir(ctx, &extracted).await {
        return Err(InstallError::ExtractionFailed {
            message: format!("{} not found", bundle.extracted_dir),
        }
        .into());
    }

    let target = install_root.join(version);
    if fs.is_symlink(ctx, &target).await {
        fs.remove_file(ctx, &target)
            .await
            .map_err(|e| fs_error("remove_file", &target, &e))?;
    } else if fs.is_dir(ctx, &target).await {
        fs.remove_dir_all(ctx, &target)
            .await
            .map_err(|e| fs_error("remove_dir_all", &target, &e))?;
    } else if fs.exists(ctx, &target).await {
        fs.remove_file(ctx, &target)
            .await
            .map_err(|e| fs_error("remove_file", &target, &e))?;
    }

    fs.copy_dir_all(ctx, &extracted, &target)
        .await
        .map_err(|e| fs_error("copy_dir_all", &target, &e))?;

    drop(temp);
    Ok(target)
}
