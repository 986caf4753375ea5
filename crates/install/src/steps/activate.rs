use dockyard_config::constants::CURRENT_LINK;
use dockyard_errors::{Error, InstallError};
use dockyard_platform::{Platform, PlatformContext};
use std::path::{Path, PathBuf};

/// Point `<install_root>/current` at `version_dir`
///
/// Whatever sits at `current` is removed first. The new link is relative
/// (just the version directory's name) so the root can be moved as a whole.
///
/// # Errors
///
/// Returns `InstallError::ActivationFailed` if the old entry cannot be
/// removed or the link cannot be created.
pub async fn activate_version(
    platform: &Platform,
    ctx: &PlatformContext,
    install_root: &Path,
    version_dir: &Path,
) -> Result<PathBuf, Error> {
    let fs = platform.filesystem();
    let link = install_root.join(CURRENT_LINK);
    let version = version_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let failed = |message: String| InstallError::ActivationFailed {
        version: version.clone(),
        message,
    };

    if version.is_empty() {
        return Err(failed(format!("{} has no final component", version_dir.display())).into());
    }

    if fs.is_symlink(ctx, &link).await {
        fs.remove_file(ctx, &link)
            .await
            .map_err(|e| failed(e.to_string()))?;
    } else if fs.is_dir(ctx, &link).await {
        fs.remove_dir_all(ctx, &link)
            .await
            .map_err(|e| failed(e.to_string()))?;
    } else if fs.exists(ctx, &link).await {
        fs.remove_file(ctx, &link)
            .await
            .map_err(|e| failed(e.to_string()))?;
    }

    fs.symlink(ctx, Path::new(&version), &link)
        .await
        .map_err(|e| failed(e.to_string()))?;

    Ok(link)
}
