use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Summary of a completed installation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallReport {
    /// Display name
    pub name: String,
    /// Version string derived from the bundle file name
    pub version: String,
    pub install_root: PathBuf,
    pub version_dir: PathBuf,
    /// The `current` link inside the install root
    pub current_link: PathBuf,
    /// Launcher wrapper script
    pub launcher: PathBuf,
    pub desktop_entry: Option<PathBuf>,
    pub icon: Option<PathBuf>,
    /// Advisory failures the run continued past
    pub warnings: Vec<String>,
    /// Whether the sandbox helper received root ownership and the setuid bit
    pub sandbox_fixed: bool,
    pub duration_ms: u64,
}

impl InstallReport {
    /// Whether every advisory step succeeded
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
