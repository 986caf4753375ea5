//! The `includeIf` block in the global config

use dockyard_errors::{Error, GitConfigError};
use dockyard_platform::{Platform, PlatformContext};
use serde::Serialize;
use std::path::Path;

/// Whether `ensure_include` had to touch the global config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludeStatus {
    Appended,
    AlreadyPresent,
}

/// Block including `fragment` for every repository below `scope_dir`
///
/// `scope_dir` is written with exactly one trailing `/`, which makes
/// `gitdir:` match the whole subtree.
#[must_use]
pub fn include_block(scope_dir: &Path, fragment: &Path) -> String {
    let dir = scope_dir.to_string_lossy();
    let dir = dir.trim_end_matches('/');
    format!(
        "[includeIf \"gitdir:{dir}/\"]\n\tpath = {}\n",
        fragment.display()
    )
}

/// Append `block` to the global config unless it is already in there verbatim
///
/// A missing config file counts as empty and is created.
///
/// # Errors
///
/// Returns `GitConfigError::ReadFailed` or `GitConfigError::WriteFailed`.
pub async fn ensure_include(
    platform: &Platform,
    ctx: &PlatformContext,
    global_config: &Path,
    block: &str,
) -> Result<IncludeStatus, Error> {
    let fs = platform.filesystem();

    let existing = if fs.exists(ctx, global_config).await {
        fs.read_to_string(ctx, global_config)
            .await
            .map_err(|e| GitConfigError::ReadFailed {
                path: global_config.display().to_string(),
                message: e.to_string(),
            })?
    } else {
        String::new()
    };

    if existing.contains(block) {
        return Ok(IncludeStatus::AlreadyPresent);
    }

    let addition = format!("\n{block}");
    fs.append_file(ctx, global_config, addition.as_bytes())
        .await
        .map_err(|e| GitConfigError::WriteFailed {
            path: global_config.display().to_string(),
            message: e.to_string(),
        })?;

    Ok(IncludeStatus::Appended)
}
