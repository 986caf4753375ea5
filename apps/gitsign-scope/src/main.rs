//! gitsign-scope - per-directory Git commit signing setup
//!
//! Asks for a parent directory and a signing identity, writes a config
//! fragment for it and includes that fragment from `~/.gitconfig` for
//! repositories under the directory.

mod prompt;

use crate::prompt::DialoguerPrompter;
use clap::Parser;
use console::style;
use dockyard_config::{Config, HomeLayout};
use dockyard_errors::{Error, UserFacingError};
use dockyard_events::{AppEvent, EventReceiver};
use dockyard_gitsign::{IncludeStatus, LinePrompter, Prompter, SetupOutcome, SigningSetup};
use dockyard_platform::{Platform, PlatformContext};
use std::io::IsTerminal;
use std::process;

/// gitsign-scope - sign commits with a dedicated key under one directory
#[derive(Parser)]
#[command(name = "gitsign-scope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Configure GPG commit signing for every repository under a directory")]
struct Cli {}

#[tokio::main]
async fn main() {
    let _cli = Cli::parse();
    init_tracing();

    match run().await {
        Ok(outcome) => report(&outcome),
        Err(e) => {
            tracing::error!("setup failed: {}", e);
            eprintln!("Error: {}", render_error(&e));
            process::exit(1);
        }
    }
}

async fn run() -> Result<SetupOutcome, Error> {
    let layout = HomeLayout::detect()?;
    let mut config = Config::load_or_default(None).await?;
    config.merge_env()?;

    let (event_sender, event_receiver) = dockyard_events::channel();
    let ctx = PlatformContext::new(Some(event_sender));
    let setup = SigningSetup::new(config, layout, Platform::current());

    println!("{}", style("Git signing setup").bold());

    let mut prompter: Box<dyn Prompter> = if std::io::stdin().is_terminal() {
        Box::new(DialoguerPrompter::new())
    } else {
        Box::new(LinePrompter::new(std::io::stdin().lock(), std::io::stdout()))
    };

    let cwd = std::env::current_dir()?;
    let result = setup.run(prompter.as_mut(), &ctx, &cwd).await;
    drop(ctx);
    log_events(event_receiver);
    result
}

/// Mirror buffered events into the log
fn log_events(mut receiver: EventReceiver) {
    while let Ok(message) = receiver.try_recv() {
        match &message.event {
            AppEvent::GitConfig(event) => tracing::info!(?event, "git config"),
            AppEvent::Platform(event) => tracing::debug!(?event, "platform"),
            other => tracing::debug!(event = ?other, "event"),
        }
    }
}

fn report(outcome: &SetupOutcome) {
    // Prompts leave the cursor mid-line when answers are piped
    println!();
    println!(
        "{} Wrote custom Git config to {}",
        style("✓").green(),
        outcome.fragment_path.display()
    );
    match outcome.include {
        IncludeStatus::Appended => println!(
            "{} Appended include block to {}",
            style("✓").green(),
            outcome.global_config.display()
        ),
        IncludeStatus::AlreadyPresent => println!(
            "{} Include block already exists in .gitconfig",
            style("ℹ").cyan()
        ),
    }
}

fn render_error(e: &Error) -> String {
    let mut rendered = e.user_message().into_owned();
    if let Some(code) = e.user_code() {
        rendered.push_str(&format!("\n  Code: {code}"));
    }
    if let Some(hint) = e.user_hint() {
        rendered.push_str(&format!("\n  Hint: {hint}"));
    }
    rendered
}

fn init_tracing() {
    // Quiet unless RUST_LOG asks otherwise; stdout belongs to the prompts
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
