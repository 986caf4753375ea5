use dockyard_errors::Error;
use dockyard_platform::{Platform, PlatformContext};
use std::path::{Path, PathBuf};

/// Result of the sandbox helper fix-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SandboxOutcome {
    /// Helper is now `root:root` with mode 4755
    Fixed(PathBuf),
    /// No helper shipped in the bundle
    Missing(PathBuf),
}

/// Give the setuid sandbox helper root ownership and mode 4755 via `sudo`
///
/// # Errors
///
/// Returns the failing `chown`/`chmod` invocation; callers treat it as advisory.
pub async fn fix_sandbox_helper(
    platform: &Platform,
    ctx: &PlatformContext,
    version_dir: &Path,
    helper: &str,
) -> Result<SandboxOutcome, Error> {
    let path = version_dir.join(helper);
    if !platform.filesystem().exists(ctx, &path).await {
        return Ok(SandboxOutcome::Missing(path));
    }

    let target = path.to_string_lossy().into_owned();

    let mut chown = platform.command("sudo");
    chown.args(["chown", "root:root", target.as_str()]);
    platform.execute_checked(ctx, chown).await?;

    let mut chmod = platform.command("sudo");
    chmod.args(["chmod", "4755", target.as_str()]);
    platform.execute_checked(ctx, chmod).await?;

    Ok(SandboxOutcome::Fixed(path))
}
