use dockyard_errors::Error;
use dockyard_platform::{Platform, PlatformContext};

/// Install system packages through `sudo apt-get`
///
/// Runs `apt-get update -y` followed by `apt-get install -y <packages>`. An
/// empty package list does nothing.
///
/// # Errors
///
/// Returns the first command failure; callers treat it as advisory.
pub async fn ensure_dependencies(
    platform: &Platform,
    ctx: &PlatformContext,
    packages: &[String],
) -> Result<(), Error> {
    if packages.is_empty() {
        return Ok(());
    }

    let mut update = platform.command("sudo");
    update.args(["apt-get", "update", "-y"]);
    platform.execute_checked(ctx, update).await?;

    let mut install = platform.command("sudo");
    install.args(["apt-get", "install", "-y"]).args(packages);
    platform.execute_checked(ctx, install).await?;

    Ok(())
}
