use dockyard_platform::{Platform, PlatformContext};
use std::path::Path;

/// Mount options of the filesystem holding `path`, via `findmnt`
///
/// `None` when `findmnt` is missing or fails.
pub async fn mount_options(
    platform: &Platform,
    ctx: &PlatformContext,
    path: &Path,
) -> Option<String> {
    let mut cmd = platform.command("findmnt");
    cmd.args(["-no", "OPTIONS", "-T"])
        .arg(path.to_string_lossy());

    match platform.execute_checked(ctx, cmd).await {
        Ok(output) => Some(output.stdout_string()),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "findmnt failed");
            None
        }
    }
}

/// Whether the filesystem holding `path` is mounted with `option`
///
/// Any failure to query the mount reads as "option absent".
pub async fn mount_has_option(
    platform: &Platform,
    ctx: &PlatformContext,
    path: &Path,
    option: &str,
) -> bool {
    mount_options(platform, ctx, path)
        .await
        .is_some_and(|options| {
            options
                .split([',', '\n'])
                .any(|candidate| candidate.trim() == option)
        })
}
