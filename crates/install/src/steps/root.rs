use dockyard_config::{Config, HomeLayout};
use dockyard_errors::Error;
use dockyard_platform::{Platform, PlatformContext};
use std::path::{Path, PathBuf};

use super::fs_error;

/// Where a bundle gets installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRoot {
    /// Directory holding one subdirectory per version plus `current`
    pub path: PathBuf,
    /// The root itself when it already is a directory, its parent otherwise
    pub parent: PathBuf,
    /// Whether the privileged system prefix was selected
    pub system: bool,
}

/// Pick the install root and create the directory it will live in
///
/// # Errors
///
/// Returns `InstallError::FilesystemError` if the parent directory cannot be
/// created.
pub async fn resolve_install_root(
    platform: &Platform,
    ctx: &PlatformContext,
    config: &Config,
    layout: &HomeLayout,
    system_dir: bool,
    cwd: &Path,
) -> Result<InstallRoot, Error> {
    let path = if system_dir {
        config.system_install_root()
    } else {
        layout.absolutize(&config.user_install_root(layout), cwd)
    };

    let fs = platform.filesystem();
    let parent = if fs.is_dir(ctx, &path).await {
        path.clone()
    } else {
        path.parent().map_or_else(|| path.clone(), Path::to_path_buf)
    };

    fs.create_dir_all(ctx, &parent)
        .await
        .map_err(|e| fs_error("create_dir_all", &parent, &e))?;

    Ok(InstallRoot {
        path,
        parent,
        system: system_dir,
    })
}
