//! Individual installation steps
//!
//! Every step takes the [`Platform`](dockyard_platform::Platform) and a
//! [`PlatformContext`](dockyard_platform::PlatformContext) explicitly, and
//! everything home-relative through a
//! [`HomeLayout`](dockyard_config::HomeLayout), so steps can run against a
//! temporary home and a scripted process layer.

mod activate;
mod dependencies;
mod desktop;
mod extract;
mod launcher;
mod mount;
mod root;
mod sandbox;
mod source;
mod stage;

pub use activate::activate_version;
pub use dependencies::ensure_dependencies;
pub use desktop::{
    install_icon, refresh_desktop_caches, render_desktop_entry, write_desktop_entry, IconOutcome,
};
pub use extract::extract_bundle;
pub use launcher::{render_launcher, write_launcher};
pub use mount::{mount_has_option, mount_options};
pub use root::{resolve_install_root, InstallRoot};
pub use sandbox::{fix_sandbox_helper, SandboxOutcome};
pub use source::validate_source;
pub use stage::{choose_work_dir, stage_bundle, WorkDir};

use dockyard_errors::{InstallError, PlatformError};
use std::path::Path;

/// Attach the operation and path to a platform failure
pub(crate) fn fs_error(operation: &str, path: &Path, err: &PlatformError) -> InstallError {
    InstallError::FilesystemError {
        operation: operation.to_string(),
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
