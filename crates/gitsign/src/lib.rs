#![warn(clippy::pedantic)]
#![deny(clippy::all)]

//! Scoped commit-signing configuration for git
//!
//! Writes a `~/.gitconfig-<dir>` fragment holding the signing key (and
//! optionally name and email) and makes the global `~/.gitconfig` include it
//! for every repository below one parent directory via `includeIf "gitdir:"`.

mod fragment;
mod include;
mod prompt;
mod setup;

pub use fragment::{fragment_path, render_fragment, write_fragment, SigningIdentity};
pub use include::{ensure_include, include_block, IncludeStatus};
pub use prompt::{prompt_optional, prompt_required, LinePrompter, Prompter};
pub use setup::{SetupOutcome, SigningSetup, PROMPT_EMAIL, PROMPT_KEY, PROMPT_NAME, PROMPT_SCOPE_DIR};
