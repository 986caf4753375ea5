//! Home-relative locations used by both tools.
//!
//! Nothing in the library crates reads `$HOME` on its own; callers build a
//! [`HomeLayout`] once and pass it down so tests can point it at a temp dir.

use std::path::{Component, Path, PathBuf};

use dockyard_errors::{Error, InstallError};

use crate::constants::{CACHE_NAMESPACE, ICON_SIZE};

/// Directories below a home directory that dockyard writes into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeLayout {
    pub home: PathBuf,
    /// `~/.cache/dockyard`
    pub cache_dir: PathBuf,
    /// `~/.local/bin`
    pub bin_dir: PathBuf,
    /// `~/.local/share/applications`
    pub applications_dir: PathBuf,
    /// `~/.local/share/icons/hicolor`
    pub icon_theme_dir: PathBuf,
    /// `~/.local/state/dockyard/logs`
    pub log_dir: PathBuf,
}

impl HomeLayout {
    /// Build the layout for an explicit home directory
    #[must_use]
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let local = home.join(".local");
        Self {
            cache_dir: home.join(".cache").join(CACHE_NAMESPACE),
            bin_dir: local.join("bin"),
            applications_dir: local.join("share").join("applications"),
            icon_theme_dir: local.join("share").join("icons").join("hicolor"),
            log_dir: local.join("state").join(CACHE_NAMESPACE).join("logs"),
            home,
        }
    }

    /// Build the layout for the current user's home directory
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn detect() -> Result<Self, Error> {
        let home = dirs::home_dir().ok_or(InstallError::HomeNotFound)?;
        Ok(Self::new(home))
    }

    /// Staging directory for exec-capable bundle copies
    #[must_use]
    pub fn work_dir(&self) -> PathBuf {
        self.cache_dir.join("work")
    }

    /// Directory receiving application icons
    #[must_use]
    pub fn icons_dir(&self) -> PathBuf {
        self.icon_theme_dir.join(ICON_SIZE).join("apps")
    }

    /// Expand a leading `~` against this layout's home directory
    #[must_use]
    pub fn expand_tilde(&self, path: &Path) -> PathBuf {
        match path.strip_prefix("~") {
            Ok(rest) => self.home.join(rest),
            Err(_) => path.to_path_buf(),
        }
    }

    /// Expand `~` and make the path absolute without touching the filesystem
    ///
    /// Relative paths are resolved against `cwd`; `.` and `..` components are
    /// folded lexically.
    #[must_use]
    pub fn absolutize(&self, path: &Path, cwd: &Path) -> PathBuf {
        let expanded = self.expand_tilde(path);
        let joined = if expanded.is_absolute() {
            expanded
        } else {
            cwd.join(expanded)
        };

        let mut out = PathBuf::new();
        for component in joined.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    out.pop();
                }
                other => out.push(other.as_os_str()),
            }
        }
        out
    }
}
