//! The per-directory config fragment

use dockyard_errors::{Error, GitConfigError};
use dockyard_platform::{Platform, PlatformContext};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Values written into the fragment's `[user]` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningIdentity {
    pub signing_key: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// `[user]` and `[commit]` sections enabling signed commits
#[must_use]
pub fn render_fragment(identity: &SigningIdentity) -> String {
    let mut text = String::from("[user]\n");
    let _ = writeln!(text, "\tsigningkey = {}", identity.signing_key);
    if let Some(name) = &identity.name {
        let _ = writeln!(text, "\tname = {name}");
    }
    if let Some(email) = &identity.email {
        let _ = writeln!(text, "\temail = {email}");
    }
    text.push_str("[commit]\n\tgpgsign = true\n");
    text
}

/// `<fragment_dir>/<prefix><last segment of scope_dir>`
///
/// # Errors
///
/// Returns `GitConfigError::InvalidDirectory` when the directory has no
/// final segment (the filesystem root).
pub fn fragment_path(fragment_dir: &Path, prefix: &str, scope_dir: &Path) -> Result<PathBuf, Error> {
    let segment = scope_dir
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| GitConfigError::InvalidDirectory {
            path: scope_dir.display().to_string(),
        })?;
    Ok(fragment_dir.join(format!("{prefix}{segment}")))
}

/// Create or overwrite the fragment
///
/// # Errors
///
/// Returns `GitConfigError::WriteFailed` if the file cannot be written.
pub async fn write_fragment(
    platform: &Platform,
    ctx: &PlatformContext,
    path: &Path,
    identity: &SigningIdentity,
) -> Result<(), Error> {
    platform
        .filesystem()
        .write_file(ctx, path, render_fragment(identity).as_bytes())
        .await
        .map_err(|e| GitConfigError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_with_only_key() {
        let identity = SigningIdentity {
            signing_key: "ABCD1234".to_string(),
            name: None,
            email: None,
        };
        assert_eq!(
            render_fragment(&identity),
            "[user]\n\tsigningkey = ABCD1234\n[commit]\n\tgpgsign = true\n"
        );
    }

    #[test]
    fn fragment_with_name_and_email() {
        let identity = SigningIdentity {
            signing_key: "ABCD1234".to_string(),
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
        };
        assert_eq!(
            render_fragment(&identity),
            "[user]\n\tsigningkey = ABCD1234\n\tname = Ada Lovelace\n\temail = ada@example.com\n[commit]\n\tgpgsign = true\n"
        );
    }

    #[test]
    fn fragment_named_after_last_segment() {
        let path = fragment_path(Path::new("/home/ada"), ".gitconfig-", Path::new("/home/ada/work")).unwrap();
        assert_eq!(path, PathBuf::from("/home/ada/.gitconfig-work"));
        assert!(fragment_path(Path::new("/home/ada"), ".gitconfig-", Path::new("/")).is_err());
    }
}
