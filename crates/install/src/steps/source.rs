use dockyard_config::HomeLayout;
use dockyard_errors::{Error, InstallError};
use dockyard_platform::{Platform, PlatformContext};
use std::path::{Path, PathBuf};

/// Resolve the bundle path and make sure it names an existing file
///
/// `~` is expanded against the layout's home and relative paths are resolved
/// against `cwd`. Symlinks are resolved once the file is known to exist.
///
/// # Errors
///
/// Returns `InstallError::SourceNotFound` when nothing exists at the path or
/// the path is a directory.
pub async fn validate_source(
    platform: &Platform,
    ctx: &PlatformContext,
    layout: &HomeLayout,
    raw: &Path,
    cwd: &Path,
) -> Result<PathBuf, Error> {
    let absolute = layout.absolutize(raw, cwd);
    let fs = platform.filesystem();

    if !fs.exists(ctx, &absolute).await || fs.is_dir(ctx, &absolute).await {
        return Err(InstallError::SourceNotFound {
            path: absolute.display().to_string(),
        }
        .into());
    }

    Ok(fs.canonicalize(ctx, &absolute).await.unwrap_or(absolute))
}
