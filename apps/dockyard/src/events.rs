//! Event handling and status display

use console::{Style, Term};
use dockyard_events::{AppEvent, EventMessage, GeneralEvent, InstallEvent};

use crate::logging::log_event_with_tracing;

/// Turns domain events into status lines on stderr
pub struct EventHandler {
    term: Term,
    colors_enabled: bool,
    /// Show debug-level events as well
    debug_enabled: bool,
    /// Suppress console output entirely (JSON mode)
    quiet: bool,
}

impl EventHandler {
    /// Create new event handler
    pub fn new(colors_enabled: bool, debug_enabled: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            colors_enabled,
            debug_enabled,
            quiet,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, message: EventMessage) {
        log_event_with_tracing(&message);
        if self.quiet {
            return;
        }

        for line in self.render(message.event) {
            let _ = self.term.write_line(&line);
        }
    }

    /// Console lines for one event, possibly none
    fn render(&self, event: AppEvent) -> Vec<String> {
        match event {
            AppEvent::Install(event) => self.render_install_event(event),
            AppEvent::General(event) => self.render_general_event(event),
            // platform and git config events only go to the log
            AppEvent::Platform(_) | AppEvent::GitConfig(_) => Vec::new(),
        }
    }

    fn render_install_event(&self, event: InstallEvent) -> Vec<String> {
        let line = match event {
            InstallEvent::Started {
                name,
                bundle,
                version,
            } => self.status_line(&format!(
                "Installing {name} {version} from {}",
                bundle.display()
            )),
            InstallEvent::DependenciesInstalling { packages } => self.status_line(&format!(
                "Installing packages (may prompt for password): {}",
                packages.join(" ")
            )),
            InstallEvent::DependenciesSkipped => {
                self.status_line("Skipping dependency installation (--no-apt)")
            }
            InstallEvent::InstallRootResolved {
                install_root,
                system: true,
            } => self.status_line(&format!(
                "Using system install dir: {}",
                install_root.display()
            )),
            InstallEvent::BundleStaged { staged } => {
                self.detail_line(&format!("Staged bundle at {}", staged.display()))
            }
            InstallEvent::ExtractionStarted { bundle } => {
                self.status_line(&format!("Extracting bundle: {}", bundle.display()))
            }
            InstallEvent::VersionInstalled { path, .. } => {
                self.status_line(&format!("Installed to: {}", path.display()))
            }
            InstallEvent::SandboxHelperFixed { path } => self.status_line(&format!(
                "Set sandbox helper owner/mode (root:root 4755): {}",
                path.display()
            )),
            InstallEvent::VersionActivated { link, target } => {
                self.status_line(&format!("Symlinked {} -> {target}", link.display()))
            }
            InstallEvent::LauncherWritten { path } => {
                self.status_line(&format!("Created launcher: {}", path.display()))
            }
            InstallEvent::IconInstalled { path } => {
                self.status_line(&format!("Installed icon: {}", path.display()))
            }
            InstallEvent::DesktopEntryWritten { path } => {
                self.status_line(&format!("Created desktop entry: {}", path.display()))
            }
            InstallEvent::CachesRefreshed { tools } => {
                self.detail_line(&format!("Refreshed caches with {}", tools.join(", ")))
            }
            // the error itself is printed by main
            InstallEvent::Failed { step, .. } => {
                self.detail_line(&format!("Stopped at step: {}", step.as_str()))
            }
            InstallEvent::InstallRootResolved { .. }
            | InstallEvent::DependenciesInstalled { .. }
            | InstallEvent::Completed { .. } => return Vec::new(),
        };
        vec![line]
    }

    fn render_general_event(&self, event: GeneralEvent) -> Vec<String> {
        match event {
            GeneralEvent::Notice { message } => vec![self.status_line(&message)],
            GeneralEvent::Warning { message, context } => {
                let mut lines = vec![self.warning_line(&message)];
                if let Some(context) = context {
                    lines.push(self.detail_line(&format!("    {context}")));
                }
                lines
            }
            GeneralEvent::Error { message, details } => {
                let mut lines = vec![self.error_line(&message)];
                if let Some(details) = details {
                    lines.push(self.detail_line(&format!("    {details}")));
                }
                lines
            }
            GeneralEvent::DebugLog { message, .. } if self.debug_enabled => {
                vec![self.detail_line(&message)]
            }
            GeneralEvent::DebugLog { .. } => Vec::new(),
        }
    }

    fn style(&self, style: Style) -> Style {
        if self.colors_enabled {
            style
        } else {
            Style::new()
        }
    }

    fn status_line(&self, message: &str) -> String {
        let marker = self.style(Style::new().cyan()).apply_to("[*]");
        format!("{marker} {message}")
    }

    fn detail_line(&self, message: &str) -> String {
        self.style(Style::new().dim()).apply_to(message).to_string()
    }

    fn warning_line(&self, message: &str) -> String {
        let marker = self.style(Style::new().yellow().bold()).apply_to("[!]");
        format!("{marker} {message}")
    }

    /// Error marker line
    fn error_line(&self, message: &str) -> String {
        let marker = self.style(Style::new().red().bold()).apply_to("[x]");
        format!("{marker} {message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockyard_events::{FailureContext, InstallStep};
    use std::path::PathBuf;

    #[test]
    fn test_install_events_render_status_lines() {
        let handler = EventHandler::new(false, false, false);

        let lines = handler.render(AppEvent::Install(InstallEvent::Started {
            name: "Cursor".to_string(),
            bundle: PathBuf::from("/tmp/Cursor-1.4.3-x86_64.AppImage"),
            version: "1.4.3".to_string(),
        }));
        assert_eq!(
            lines,
            vec!["[*] Installing Cursor 1.4.3 from /tmp/Cursor-1.4.3-x86_64.AppImage"]
        );

        let lines = handler.render(AppEvent::Install(InstallEvent::Failed {
            name: "Cursor".to_string(),
            step: InstallStep::Extract,
            failure: FailureContext::new(
                None::<String>,
                "squashfs-root not found",
                None::<String>,
                false,
            ),
        }));
        assert_eq!(lines, vec!["Stopped at step: extract"]);

        let lines = handler.render(AppEvent::Install(InstallEvent::InstallRootResolved {
            install_root: PathBuf::from("/home/ada/Apps/cursor"),
            system: false,
        }));
        assert!(lines.is_empty());
    }

    #[test]
    fn test_general_events_render_without_color() {
        let handler = EventHandler::new(false, true, false);

        let lines = handler.render(AppEvent::General(GeneralEvent::warning_with_context(
            "nosuid mount",
            "use --system-dir",
        )));
        assert_eq!(lines, vec!["[!] nosuid mount", "    use --system-dir"]);

        let lines = handler.render(AppEvent::General(GeneralEvent::debug("staged")));
        assert_eq!(lines, vec!["staged"]);
    }

    #[test]
    fn test_debug_events_hidden_without_debug() {
        let handler = EventHandler::new(false, false, false);
        let lines = handler.render(AppEvent::General(GeneralEvent::debug("staged")));
        assert!(lines.is_empty());
    }
}
