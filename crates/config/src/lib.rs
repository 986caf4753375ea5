#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for dockyard
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/dockyard/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binaries)

pub mod constants;
pub mod layout;

pub use layout::HomeLayout;

use constants::{
    DEFAULT_APP_NAME, GITCONFIG_FRAGMENT_PREFIX, GLOBAL_GITCONFIG, SYSTEM_PREFIX, USER_APPS_DIR,
};
use dockyard_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub install: InstallConfig,

    #[serde(default)]
    pub bundle: BundleConfig,

    #[serde(default)]
    pub desktop: DesktopConfig,

    #[serde(default)]
    pub git: GitConfig,
}

/// Installer behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Install root for user installs (default `~/Apps/<slug>`)
    pub install_dir: Option<PathBuf>,
    #[serde(default = "default_system_prefix")]
    pub system_prefix: PathBuf,
    #[serde(default = "default_true")]
    pub make_desktop: bool,
    #[serde(default)]
    pub skip_dependencies: bool,
    #[serde(default = "default_dependency_packages")]
    pub dependency_packages: Vec<String>,
}

/// Layout of the self-extracting bundle format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    #[serde(default = "default_extract_flag")]
    pub extract_flag: String,
    #[serde(default = "default_extracted_dir")]
    pub extracted_dir: String,
    #[serde(default = "default_entry_point")]
    pub entry_point: String,
    #[serde(default = "default_sandbox_helper")]
    pub sandbox_helper: String,
    #[serde(default = "default_sandbox_env")]
    pub sandbox_env: String,
    #[serde(default = "default_icon_resource")]
    pub icon_resource: String,
}

/// Desktop entry contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesktopConfig {
    #[serde(default = "default_comment")]
    pub comment: String,
    #[serde(default = "default_categories")]
    pub categories: String,
}

/// Locations used by the signing configuration writer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Global config file (default `~/.gitconfig`)
    pub global_config: Option<PathBuf>,
    /// Directory receiving scoped fragments (default `$HOME`)
    pub fragment_dir: Option<PathBuf>,
    #[serde(default = "default_fragment_prefix")]
    pub fragment_prefix: String,
}

// Default implementations

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            install_dir: None,
            system_prefix: default_system_prefix(),
            make_desktop: true,
            skip_dependencies: false,
            dependency_packages: default_dependency_packages(),
        }
    }
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            extract_flag: default_extract_flag(),
            extracted_dir: default_extracted_dir(),
            entry_point: default_entry_point(),
            sandbox_helper: default_sandbox_helper(),
            sandbox_env: default_sandbox_env(),
            icon_resource: default_icon_resource(),
        }
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            comment: default_comment(),
            categories: default_categories(),
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            global_config: None,
            fragment_dir: None,
            fragment_prefix: default_fragment_prefix(),
        }
    }
}

// Default value functions for serde
fn default_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

fn default_system_prefix() -> PathBuf {
    PathBuf::from(SYSTEM_PREFIX)
}

fn default_true() -> bool {
    true
}

fn default_dependency_packages() -> Vec<String> {
    vec!["libfuse2t64".to_string()]
}

fn default_extract_flag() -> String {
    "--appimage-extract".to_string()
}

fn default_extracted_dir() -> String {
    "squashfs-root".to_string()
}

fn default_entry_point() -> String {
    "AppRun".to_string()
}

fn default_sandbox_helper() -> String {
    "chrome-sandbox".to_string()
}

fn default_sandbox_env() -> String {
    "CHROME_DEVEL_SANDBOX".to_string()
}

fn default_icon_resource() -> String {
    ".DirIcon".to_string()
}

fn default_comment() -> String {
    "AI Code Editor".to_string()
}

fn default_categories() -> String {
    "Development;IDE;".to_string()
}

fn default_fragment_prefix() -> String {
    GITCONFIG_FRAGMENT_PREFIX.to_string()
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("dockyard").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if fs::try_exists(&config_path).await.unwrap_or(false) {
            tracing::debug!(path = %config_path.display(), "loading config file");
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // DOCKYARD_NAME
        if let Ok(name) = std::env::var("DOCKYARD_NAME") {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "DOCKYARD_NAME".to_string(),
                    value: name,
                }
                .into());
            }
            self.install.name = name;
        }

        // DOCKYARD_INSTALL_DIR
        if let Ok(dir) = std::env::var("DOCKYARD_INSTALL_DIR") {
            self.install.install_dir = Some(PathBuf::from(dir));
        }

        // DOCKYARD_NO_APT
        if let Ok(value) = std::env::var("DOCKYARD_NO_APT") {
            self.install.skip_dependencies = parse_bool("DOCKYARD_NO_APT", value)?;
        }

        // DOCKYARD_MAKE_DESKTOP
        if let Ok(value) = std::env::var("DOCKYARD_MAKE_DESKTOP") {
            self.install.make_desktop = parse_bool("DOCKYARD_MAKE_DESKTOP", value)?;
        }

        Ok(())
    }

    /// Lowercase form of the display name used for file names
    #[must_use]
    pub fn slug(&self) -> String {
        self.install.name.to_lowercase()
    }

    /// Install root for a user install (with default)
    #[must_use]
    pub fn user_install_root(&self, layout: &HomeLayout) -> PathBuf {
        match &self.install.install_dir {
            Some(dir) => layout.expand_tilde(dir),
            None => layout.home.join(USER_APPS_DIR).join(self.slug()),
        }
    }

    /// Install root for a system-wide install
    #[must_use]
    pub fn system_install_root(&self) -> PathBuf {
        self.install.system_prefix.join(self.slug())
    }

    /// Global git config path (with default)
    #[must_use]
    pub fn global_gitconfig(&self, layout: &HomeLayout) -> PathBuf {
        match &self.git.global_config {
            Some(path) => layout.expand_tilde(path),
            None => layout.home.join(GLOBAL_GITCONFIG),
        }
    }

    /// Directory that receives scoped git config fragments (with default)
    #[must_use]
    pub fn gitconfig_fragment_dir(&self, layout: &HomeLayout) -> PathBuf {
        match &self.git.fragment_dir {
            Some(dir) => layout.expand_tilde(dir),
            None => layout.home.clone(),
        }
    }
}

fn parse_bool(field: &str, value: String) -> Result<bool, Error> {
    match value.as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        }
        .into()),
    }
}
