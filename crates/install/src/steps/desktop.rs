use dockyard_config::{DesktopConfig, HomeLayout};
use dockyard_errors::Error;
use dockyard_platform::{Platform, PlatformContext};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::fs_error;

/// Where the icon ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconOutcome {
    /// Destination inside the icon theme, whether or not it was written
    pub path: PathBuf,
    /// False when the bundle shipped no icon resource
    pub copied: bool,
}

/// Copy the bundle's icon resource into the user icon theme
///
/// When the resource is missing nothing is written, but the destination is
/// still returned so the desktop entry can reference it.
///
/// # Errors
///
/// Returns `InstallError::FilesystemError` if the icon directory cannot be
/// created or the copy fails.
pub async fn install_icon(
    platform: &Platform,
    ctx: &PlatformContext,
    layout: &HomeLayout,
    slug: &str,
    version_dir: &Path,
    icon_resource: &str,
) -> Result<IconOutcome, Error> {
    let fs = platform.filesystem();
    let icons_dir = layout.icons_dir();
    fs.create_dir_all(ctx, &icons_dir)
        .await
        .map_err(|e| fs_error("create_dir_all", &icons_dir, &e))?;

    let path = icons_dir.join(format!("{slug}.png"));
    let source = version_dir.join(icon_resource);
    if !fs.exists(ctx, &source).await {
        return Ok(IconOutcome {
            path,
            copied: false,
        });
    }

    fs.copy_file(ctx, &source, &path)
        .await
        .map_err(|e| fs_error("copy_file", &path, &e))?;

    Ok(IconOutcome { path, copied: true })
}

/// Contents of the `.desktop` file
#[must_use]
pub fn render_desktop_entry(
    name: &str,
    wrapper: &Path,
    icon: &Path,
    desktop: &DesktopConfig,
) -> String {
    let mut entry = String::from("[Desktop Entry]\n");
    let _ = writeln!(entry, "Name={name}");
    let _ = writeln!(entry, "Comment={}", desktop.comment);
    let _ = writeln!(entry, "Exec={} %U", wrapper.display());
    let _ = writeln!(entry, "Icon={}", icon.display());
    entry.push_str("Terminal=false\n");
    entry.push_str("Type=Application\n");
    let _ = writeln!(entry, "Categories={}", desktop.categories);
    entry.push_str("StartupNotify=true\n");
    entry
}

/// Write `~/.local/share/applications/<slug>.desktop` with mode 0644
///
/// # Errors
///
/// Returns `InstallError::FilesystemError` if the applications directory or
/// the entry cannot be written.
pub async fn write_desktop_entry(
    platform: &Platform,
    ctx: &PlatformContext,
    layout: &HomeLayout,
    name: &str,
    wrapper: &Path,
    icon: &Path,
    desktop: &DesktopConfig,
) -> Result<PathBuf, Error> {
    let fs = platform.filesystem();
    let apps_dir = &layout.applications_dir;
    fs.create_dir_all(ctx, apps_dir)
        .await
        .map_err(|e| fs_error("create_dir_all", apps_dir, &e))?;

    let path = apps_dir.join(format!("{}.desktop", name.to_lowercase()));
    let contents = render_desktop_entry(name, wrapper, icon, desktop);

    fs.write_file(ctx, &path, contents.as_bytes())
        .await
        .map_err(|e| fs_error("write_file", &path, &e))?;
    fs.set_mode(ctx, &path, 0o644)
        .await
        .map_err(|e| fs_error("set_mode", &path, &e))?;

    Ok(path)
}

/// Run the desktop database and icon cache refreshers that are on `PATH`
///
/// Failures are ignored. Returns the tools that ran successfully.
pub async fn refresh_desktop_caches(
    platform: &Platform,
    ctx: &PlatformContext,
    layout: &HomeLayout,
) -> Vec<String> {
    let apps_dir = layout.applications_dir.to_string_lossy().into_owned();
    let theme_dir = layout.icon_theme_dir.to_string_lossy().into_owned();
    let refreshers: [(&str, Vec<&str>); 2] = [
        ("update-desktop-database", vec![apps_dir.as_str()]),
        ("gtk-update-icon-cache", vec!["-f", theme_dir.as_str()]),
    ];

    let mut ran = Vec::new();
    for (tool, args) in refreshers {
        if platform.which(tool).await.is_err() {
            continue;
        }
        let mut cmd = platform.command(tool);
        cmd.args(args);
        match platform.execute_checked(ctx, cmd).await {
            Ok(_) => ran.push(tool.to_string()),
            Err(e) => tracing::debug!(tool, error = %e, "cache refresh failed"),
        }
    }
    ran
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_entry_fields() {
        let entry = render_desktop_entry(
            "Cursor",
            Path::new("/home/ada/.local/bin/cursor-launch"),
            Path::new("/home/ada/.local/share/icons/hicolor/256x256/apps/cursor.png"),
            &DesktopConfig::default(),
        );
        let lines: Vec<&str> = entry.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[Desktop Entry]",
                "Name=Cursor",
                "Comment=AI Code Editor",
                "Exec=/home/ada/.local/bin/cursor-launch %U",
                "Icon=/home/ada/.local/share/icons/hicolor/256x256/apps/cursor.png",
                "Terminal=false",
                "Type=Application",
                "Categories=Development;IDE;",
                "StartupNotify=true",
            ]
        );
    }
}
