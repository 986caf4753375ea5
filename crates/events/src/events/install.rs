use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FailureContext;

/// Steps of a bundle installation, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallStep {
    Validate,
    Dependencies,
    ResolveRoot,
    MountCheck,
    Stage,
    Extract,
    SandboxHelper,
    Activate,
    Launcher,
    Icon,
    DesktopEntry,
    CacheRefresh,
}

impl InstallStep {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::Dependencies => "dependencies",
            Self::ResolveRoot => "resolve_root",
            Self::MountCheck => "mount_check",
            Self::Stage => "stage",
            Self::Extract => "extract",
            Self::SandboxHelper => "sandbox_helper",
            Self::Activate => "activate",
            Self::Launcher => "launcher",
            Self::Icon => "icon",
            Self::DesktopEntry => "desktop_entry",
            Self::CacheRefresh => "cache_refresh",
        }
    }
}

/// Installation domain events - maps to the install crate and the `dockyard` command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InstallEvent {
    /// Installation of a bundle started
    Started {
        name: String,
        bundle: PathBuf,
        version: String,
    },

    /// System packages are being installed through the package manager
    DependenciesInstalling { packages: Vec<String> },

    /// System package installation finished
    DependenciesInstalled { packages: Vec<String> },

    /// Dependency installation was skipped on request
    DependenciesSkipped,

    /// The install root was chosen
    InstallRootResolved { install_root: PathBuf, system: bool },

    /// The bundle was copied into an exec-capable staging directory
    BundleStaged { staged: PathBuf },

    /// The bundle's self-extraction started
    ExtractionStarted { bundle: PathBuf },

    /// Extracted contents were installed into the version directory
    VersionInstalled { version: String, path: PathBuf },

    /// The privileged sandbox helper now has root ownership and mode 4755
    SandboxHelperFixed { path: PathBuf },

    /// The `current` link now points at the new version
    VersionActivated { link: PathBuf, target: String },

    /// Launcher wrapper script written
    LauncherWritten { path: PathBuf },

    /// Icon copied into the icon theme
    IconInstalled { path: PathBuf },

    /// Desktop menu entry written
    DesktopEntryWritten { path: PathBuf },

    /// Desktop and icon caches refreshed with the listed tools
    CachesRefreshed { tools: Vec<String> },

    /// Installation completed
    Completed {
        name: String,
        version: String,
        install_root: PathBuf,
        duration_ms: u64,
    },

    /// Installation failed at a fatal step
    Failed {
        name: String,
        step: InstallStep,
        failure: FailureContext,
    },
}
