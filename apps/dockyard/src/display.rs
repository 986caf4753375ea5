//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use dockyard_install::InstallReport;
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool) -> Self {
        Self {
            json_output,
            term: Term::stdout(),
        }
    }

    /// Render the install report followed by usage guidance
    pub fn render_install_report(&self, report: &InstallReport) -> io::Result<()> {
        if self.json_output {
            return self.render_json(report);
        }

        self.render_table(report);
        self.render_guidance(report);
        Ok(())
    }

    /// Render as JSON
    fn render_json(&self, report: &InstallReport) -> io::Result<()> {
        let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
        println!("{json}");
        Ok(())
    }

    /// Render as formatted table
    fn render_table(&self, report: &InstallReport) {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Item").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        let optional = |path: Option<&std::path::PathBuf>| {
            path.map_or_else(|| "-".to_string(), |p| p.display().to_string())
        };

        table.add_row(vec![Cell::new("Name"), Cell::new(&report.name)]);
        table.add_row(vec![Cell::new("Version"), Cell::new(&report.version)]);
        table.add_row(vec![
            Cell::new("Install root"),
            Cell::new(report.install_root.display()),
        ]);
        table.add_row(vec![
            Cell::new("Version dir"),
            Cell::new(report.version_dir.display()),
        ]);
        table.add_row(vec![
            Cell::new("Current link"),
            Cell::new(report.current_link.display()),
        ]);
        table.add_row(vec![
            Cell::new("Launcher"),
            Cell::new(report.launcher.display()),
        ]);
        table.add_row(vec![
            Cell::new("Desktop entry"),
            Cell::new(optional(report.desktop_entry.as_ref())),
        ]);
        table.add_row(vec![Cell::new("Icon"), Cell::new(optional(report.icon.as_ref()))]);

        let sandbox = if report.sandbox_fixed {
            Cell::new("root:root 4755").fg(Color::Green)
        } else {
            Cell::new("not fixed").fg(Color::Yellow)
        };
        table.add_row(vec![Cell::new("Sandbox helper"), sandbox]);
        table.add_row(vec![
            Cell::new("Duration"),
            Cell::new(format!("{} ms", report.duration_ms)),
        ]);

        println!("{table}");

        if !report.warnings.is_empty() {
            println!();
            println!("Warnings ({}):", report.warnings.len());
            for warning in &report.warnings {
                println!("  • {warning}");
            }
        }
    }

    /// Launch command and window-class hint
    fn render_guidance(&self, report: &InstallReport) {
        let bold = if self.supports_color() {
            Style::new().bold()
        } else {
            Style::new()
        };

        if report.desktop_entry.is_some() {
            println!();
            println!("Installed desktop entry. You may need to log out/in for the app grid to refresh.");
        } else {
            println!();
            println!("Skipped desktop entry (--make-desktop=no).");
        }

        println!();
        println!("{}", bold.apply_to("All set!"));
        println!("Run {} with:", report.name);
        println!("  {}", report.launcher.display());

        if let Some(entry) = &report.desktop_entry {
            println!();
            println!("If the dock icon doesn't group correctly, run:");
            println!("  xprop WM_CLASS   # click the {} window", report.name);
            println!(
                "Then add StartupWMClass=<value> to {}",
                entry.display()
            );
        }
    }

    /// Check if color output is supported
    fn supports_color(&self) -> bool {
        self.term.features().colors_supported()
    }
}
