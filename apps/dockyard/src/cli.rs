//! Command line interface definition

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// dockyard - install self-extracting desktop application bundles
#[derive(Parser)]
#[command(name = "dockyard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Install a self-extracting desktop application bundle")]
#[command(long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub install: InstallArgs,
}

/// Output and configuration flags
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging to ~/.local/state/dockyard/logs/
    #[arg(long)]
    pub debug: bool,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// What to install and where
#[derive(Parser)]
pub struct InstallArgs {
    /// Path to the bundle (e.g. Cursor-1.4.3-x86_64.AppImage)
    #[arg(value_name = "BUNDLE")]
    pub bundle: PathBuf,

    /// Install root for user installs [default: ~/Apps/<name>]
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// Display name used for the desktop entry and file names [default: Cursor]
    #[arg(long)]
    pub name: Option<String>,

    /// Create the icon and desktop entry [default: yes]
    #[arg(long, value_enum, value_name = "yes|no")]
    pub make_desktop: Option<Toggle>,

    /// Install under the system prefix (/opt/<name>); needs sudo
    #[arg(long)]
    pub system_dir: bool,

    /// Skip installing system packages through apt
    #[arg(long)]
    pub no_apt: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    Yes,
    No,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Toggle::Yes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "dockyard",
            "--json",
            "Cursor-1.4.3-x86_64.AppImage",
            "--install-dir=/srv/cursor",
            "--name",
            "Editor",
            "--make-desktop=no",
            "--system-dir",
            "--no-apt",
        ])
        .unwrap();

        assert!(cli.global.json);
        assert_eq!(cli.install.bundle, PathBuf::from("Cursor-1.4.3-x86_64.AppImage"));
        assert_eq!(cli.install.install_dir, Some(PathBuf::from("/srv/cursor")));
        assert_eq!(cli.install.name.as_deref(), Some("Editor"));
        assert_eq!(cli.install.make_desktop, Some(Toggle::No));
        assert!(cli.install.system_dir);
        assert!(cli.install.no_apt);
    }

    #[test]
    fn rejects_unknown_toggle() {
        let result = Cli::try_parse_from(["dockyard", "app.AppImage", "--make-desktop", "maybe"]);
        assert!(result.is_err());
    }
}
