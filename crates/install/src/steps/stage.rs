use dockyard_errors::{Error, InstallError};
use dockyard_platform::{Platform, PlatformContext};
use std::path::{Path, PathBuf};

use super::mount::mount_has_option;

/// Directory the bundle is copied into before it is executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDir {
    pub path: PathBuf,
    /// The preferred directory was on a `noexec` mount
    pub fell_back: bool,
}

/// Use `preferred` unless it sits on a `noexec` mount, then `fallback`
///
/// Both are created as needed.
///
/// # Errors
///
/// Returns `InstallError::StagingFailed` if the chosen directory cannot be created.
pub async fn choose_work_dir(
    platform: &Platform,
    ctx: &PlatformContext,
    preferred: &Path,
    fallback: &Path,
) -> Result<WorkDir, Error> {
    let fs = platform.filesystem();
    let staging_failed = |path: &Path, message: String| InstallError::StagingFailed {
        path: path.display().to_string(),
        message,
    };

    fs.create_dir_all(ctx, preferred)
        .await
        .map_err(|e| staging_failed(preferred, e.to_string()))?;

    if !mount_has_option(platform, ctx, preferred, "noexec").await {
        return Ok(WorkDir {
            path: preferred.to_path_buf(),
            fell_back: false,
        });
    }

    fs.create_dir_all(ctx, fallback)
        .await
        .map_err(|e| staging_failed(fallback, e.to_string()))?;

    Ok(WorkDir {
        path: fallback.to_path_buf(),
        fell_back: true,
    })
}

/// Copy the bundle into `work_dir` and mark it executable (0755)
///
/// # Errors
///
/// Returns `InstallError::StagingFailed` if the copy or the mode change fails.
pub async fn stage_bundle(
    platform: &Platform,
    ctx: &PlatformContext,
    bundle: &Path,
    work_dir: &Path,
) -> Result<PathBuf, Error> {
    let file_name = bundle.file_name().ok_or_else(|| InstallError::StagingFailed {
        path: bundle.display().to_string(),
        message: "path has no file name".to_string(),
    })?;
    let staged = work_dir.join(file_name);
    let fs = platform.filesystem();

    let staging_failed = |message: String| InstallError::StagingFailed {
        path: staged.display().to_string(),
        message,
    };

    // The bundle may already live in the work dir; never delete the source
    let same_file = match (
        fs.canonicalize(ctx, bundle).await,
        fs.canonicalize(ctx, &staged).await,
    ) {
        (Ok(source), Ok(target)) => source == target,
        _ => false,
    };

    if !same_file {
        // a previous run's copy may be read-only
        if fs.exists(ctx, &staged).await {
            fs.remove_file(ctx, &staged)
                .await
                .map_err(|e| staging_failed(e.to_string()))?;
        }

        fs.copy_file(ctx, bundle, &staged)
            .await
            .map_err(|e| staging_failed(e.to_string()))?;
    }
    fs.set_mode(ctx, &staged, 0o755)
        .await
        .map_err(|e| staging_failed(e.to_string()))?;

    Ok(staged)
}
