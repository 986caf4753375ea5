//! dockyard - desktop application bundle installer
//!
//! Parses the command line, merges configuration, and runs the installer
//! while rendering its events.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, InstallArgs};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use dockyard_config::{Config, HomeLayout};
use dockyard_errors::Error;
use dockyard_events::EventReceiver;
use dockyard_install::{InstallContext, InstallReport, Installer};
use dockyard_platform::Platform;
use std::future::Future;
use std::path::PathBuf;
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    // Initialize tracing with JSON awareness
    init_tracing(json_mode, cli.global.debug);

    // Run the application and handle errors
    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting dockyard v{}", env!("CARGO_PKG_VERSION"));

    let layout = HomeLayout::detect()?;

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli.install);

    // Create event channel
    let (event_sender, event_receiver) = dockyard_events::channel();

    let context = InstallContext::new()
        .with_bundle(cli.install.bundle.clone())
        .with_cwd(std::env::current_dir()?)
        .with_system_dir(cli.install.system_dir)
        .with_event_sender(event_sender);

    let installer = Installer::new(config, layout, Platform::current());
    let renderer = OutputRenderer::new(cli.global.json);
    let colors_enabled = console::Term::stderr().features().colors_supported();
    let mut event_handler = EventHandler::new(colors_enabled, cli.global.debug, cli.global.json);

    // Execute with event handling
    let report = execute_with_events(
        installer.install(context),
        event_receiver,
        &mut event_handler,
    )
    .await?;

    // Render final result
    renderer.render_install_report(&report)?;

    info!("Install completed successfully");
    Ok(())
}

/// Run the installer while draining its events
async fn execute_with_events<F>(
    operation: F,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<InstallReport, CliError>
where
    F: Future<Output = Result<InstallReport, Error>>,
{
    let mut operation = Box::pin(operation);

    // Handle events concurrently with the install
    loop {
        select! {
            // Install finished
            result = &mut operation => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result.map_err(CliError::from);
            }

            // Event received
            event = event_receiver.recv() => {
                match event {
                    Some(event) => event_handler.handle_event(event),
                    None => { /* Channel closed: keep waiting for the install to finish */ }
                }
            }
        }
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, args: &InstallArgs) {
    if let Some(name) = &args.name {
        config.install.name.clone_from(name);
    }
    if let Some(dir) = &args.install_dir {
        config.install.install_dir = Some(dir.clone());
    }
    if let Some(toggle) = args.make_desktop {
        config.install.make_desktop = toggle.enabled();
    }
    if args.no_apt {
        config.install.skip_dependencies = true;
    }
}

/// Log directory, falling back to the temp dir when `$HOME` is unknown
fn log_dir() -> PathBuf {
    HomeLayout::detect().map_or_else(
        |_| std::env::temp_dir().join("dockyard-logs"),
        |layout| layout.log_dir,
    )
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    // Check if debug logging is enabled
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if json_mode {
        // JSON mode: suppress all console output to avoid contaminating JSON
        if debug_enabled {
            // In debug mode with JSON, still log to file
            let log_dir = log_dir();
            if std::fs::create_dir_all(&log_dir).is_ok() {
                let log_file = log_dir.join(format!(
                    "dockyard-{}.log",
                    chrono::Utc::now().format("%Y%m%d-%H%M%S")
                ));

                if let Ok(file) = std::fs::File::create(&log_file) {
                    tracing_subscriber::fmt()
                        .json()
                        .with_writer(file)
                        .with_env_filter(
                            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                                |_| tracing_subscriber::EnvFilter::new("info,dockyard=debug"),
                            ),
                        )
                        .init();
                    return;
                }
            }
        }
        // Fallback: disable all logging in JSON mode
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else if debug_enabled {
        // Debug mode: structured JSON logs to file
        let log_dir = log_dir();
        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            eprintln!("Warning: Failed to create log directory: {e}");
        }

        let log_file = log_dir.join(format!(
            "dockyard-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| tracing_subscriber::EnvFilter::new("info,dockyard=debug"),
                        ),
                    )
                    .init();

                eprintln!("Debug logging enabled: {}", log_file.display());
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log file: {e}");
                // Fallback to stderr
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                    )
                    .init();
            }
        }
    } else {
        // Normal mode: the event handler owns the console
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter("off")
            .init();
    }
}
