//! Fixed names and locations that are not exposed via TOML configuration.
//!
//! Desktop environments look for launchers, icons and menu entries in these
//! XDG locations, so they stay stable regardless of the install root.

/// Prefix for system-wide installs (`--system-dir`)
pub const SYSTEM_PREFIX: &str = "/opt";

/// Default application display name
pub const DEFAULT_APP_NAME: &str = "Cursor";

/// Default install parent below `$HOME`
pub const USER_APPS_DIR: &str = "Apps";

/// Name of the symlink selecting the active version
pub const CURRENT_LINK: &str = "current";

/// Suffix appended to the lowercase app name for the launcher script
pub const LAUNCHER_SUFFIX: &str = "-launch";

/// Icon theme size bucket the embedded icon is installed into
pub const ICON_SIZE: &str = "256x256";

/// Directory name below the cache dir used for staging bundles
pub const CACHE_NAMESPACE: &str = "dockyard";

/// Fallback staging directory created next to the install root
pub const FALLBACK_WORK_DIR: &str = ".dockyard-work";

/// Label used when a bundle file name carries no `X.Y.Z` version
pub const VERSION_PLACEHOLDER: &str = "unknown";

/// Global git configuration file name below `$HOME`
pub const GLOBAL_GITCONFIG: &str = ".gitconfig";

/// Prefix of scoped git configuration fragments below `$HOME`
pub const GITCONFIG_FRAGMENT_PREFIX: &str = ".gitconfig-";
