use dockyard_config::constants::{CURRENT_LINK, LAUNCHER_SUFFIX};
use dockyard_config::{BundleConfig, HomeLayout};
use dockyard_errors::Error;
use dockyard_platform::{Platform, PlatformContext};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::fs_error;

/// Wrapper script that exports the sandbox location and execs the entry point
#[must_use]
pub fn render_launcher(install_root: &Path, bundle: &BundleConfig) -> String {
    let current = install_root.join(CURRENT_LINK);
    let mut script = String::from("#!/usr/bin/env bash\nset -euo pipefail\n");
    let _ = writeln!(
        script,
        "export {}=\"{}\"",
        bundle.sandbox_env,
        current.join(&bundle.sandbox_helper).display()
    );
    let _ = writeln!(
        script,
        "exec \"{}\" \"$@\"",
        current.join(&bundle.entry_point).display()
    );
    script
}

/// Write `~/.local/bin/<slug>-launch` with mode 0755
///
/// # Errors
///
/// Returns `InstallError::FilesystemError` if the bin directory or the
/// script cannot be written.
pub async fn write_launcher(
    platform: &Platform,
    ctx: &PlatformContext,
    layout: &HomeLayout,
    slug: &str,
    install_root: &Path,
    bundle: &BundleConfig,
) -> Result<PathBuf, Error> {
    let fs = platform.filesystem();
    fs.create_dir_all(ctx, &layout.bin_dir)
        .await
        .map_err(|e| fs_error("create_dir_all", &layout.bin_dir, &e))?;

    let wrapper = layout.bin_dir.join(format!("{slug}{LAUNCHER_SUFFIX}"));
    let script = render_launcher(install_root, bundle);

    fs.write_file(ctx, &wrapper, script.as_bytes())
        .await
        .map_err(|e| fs_error("write_file", &wrapper, &e))?;
    fs.set_mode(ctx, &wrapper, 0o755)
        .await
        .map_err(|e| fs_error("set_mode", &wrapper, &e))?;

    Ok(wrapper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launcher_script_layout() {
        let script = render_launcher(Path::new("/home/ada/Apps/cursor"), &BundleConfig::default());
        assert_eq!(
            script,
            "#!/usr/bin/env bash\n\
             set -euo pipefail\n\
             export CHROME_DEVEL_SANDBOX=\"/home/ada/Apps/cursor/current/chrome-sandbox\"\n\
             exec \"/home/ada/Apps/cursor/current/AppRun\" \"$@\"\n"
        );
    }
}
