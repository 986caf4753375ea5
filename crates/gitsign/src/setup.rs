//! The interactive setup flow

use dockyard_config::{Config, HomeLayout};
use dockyard_errors::Error;
use dockyard_events::{EventEmitter, GitConfigEvent};
use dockyard_platform::{Platform, PlatformContext};
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::fragment::{fragment_path, write_fragment, SigningIdentity};
use crate::include::{ensure_include, include_block, IncludeStatus};
use crate::prompt::{prompt_optional, prompt_required, Prompter};

pub const PROMPT_SCOPE_DIR: &str = "Enter the full path to the parent folder where Git repos live";
pub const PROMPT_KEY: &str = "Enter your GPG signing key ID";
pub const PROMPT_NAME: &str = "Enter your Git user name";
pub const PROMPT_EMAIL: &str = "Enter your Git email";

/// What a setup run did
#[derive(Debug, Clone, Serialize)]
pub struct SetupOutcome {
    /// Canonical parent directory the signing config applies to
    pub scope_dir: PathBuf,
    pub fragment_path: PathBuf,
    pub global_config: PathBuf,
    pub include: IncludeStatus,
}

/// Collects answers and writes the fragment plus the include block
pub struct SigningSetup {
    config: Config,
    layout: HomeLayout,
    platform: Platform,
}

impl SigningSetup {
    #[must_use]
    pub fn new(config: Config, layout: HomeLayout, platform: Platform) -> Self {
        Self {
            config,
            layout,
            platform,
        }
    }

    /// Ask the four questions, then write the fragment and ensure the include
    ///
    /// # Errors
    ///
    /// Returns prompt failures and any read/write failure on the two files.
    pub async fn run(
        &self,
        prompter: &mut dyn Prompter,
        ctx: &PlatformContext,
        cwd: &Path,
    ) -> Result<SetupOutcome, Error> {
        let raw_dir = prompt_required(prompter, PROMPT_SCOPE_DIR)?;
        let signing_key = prompt_required(prompter, PROMPT_KEY)?;
        let name = prompt_optional(prompter, PROMPT_NAME)?;
        let email = prompt_optional(prompter, PROMPT_EMAIL)?;

        let identity = SigningIdentity {
            signing_key,
            name,
            email,
        };
        self.apply(ctx, Path::new(&raw_dir), &identity, cwd).await
    }

    /// Write the configuration for an already collected set of answers
    ///
    /// # Errors
    ///
    /// Returns `GitConfigError::InvalidDirectory` for the filesystem root and
    /// read/write failures on the fragment or the global config.
    pub async fn apply(
        &self,
        ctx: &PlatformContext,
        raw_dir: &Path,
        identity: &SigningIdentity,
        cwd: &Path,
    ) -> Result<SetupOutcome, Error> {
        let scope_dir = self.resolve_scope_dir(ctx, raw_dir, cwd).await;
        tracing::debug!(scope_dir = %scope_dir.display(), "resolved signing scope");

        let fragment = fragment_path(
            &self.config.gitconfig_fragment_dir(&self.layout),
            &self.config.git.fragment_prefix,
            &scope_dir,
        )?;
        write_fragment(&self.platform, ctx, &fragment, identity).await?;
        ctx.emit_git_config(GitConfigEvent::FragmentWritten {
            path: fragment.clone(),
        });

        let global_config = self.config.global_gitconfig(&self.layout);
        let block = include_block(&scope_dir, &fragment);
        let include = ensure_include(&self.platform, ctx, &global_config, &block).await?;
        ctx.emit_git_config(match include {
            IncludeStatus::Appended => GitConfigEvent::IncludeAppended {
                config_path: global_config.clone(),
            },
            IncludeStatus::AlreadyPresent => GitConfigEvent::IncludeAlreadyPresent {
                config_path: global_config.clone(),
            },
        });

        Ok(SetupOutcome {
            scope_dir,
            fragment_path: fragment,
            global_config,
            include,
        })
    }

    /// Expand `~` and resolve symlinks
    ///
    /// A directory that does not exist yet keeps its missing tail; only the
    /// longest existing ancestor is canonicalized.
    async fn resolve_scope_dir(&self, ctx: &PlatformContext, raw: &Path, cwd: &Path) -> PathBuf {
        let absolute = self.layout.absolutize(raw, cwd);
        let fs = self.platform.filesystem();

        let mut missing: Vec<OsString> = Vec::new();
        let mut existing = absolute.as_path();
        loop {
            if let Ok(resolved) = fs.canonicalize(ctx, existing).await {
                return missing
                    .iter()
                    .rev()
                    .fold(resolved, |path, segment| path.join(segment));
            }
            match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(segment)) => {
                    missing.push(segment.to_os_string());
                    existing = parent;
                }
                _ => return absolute.clone(),
            }
        }
    }
}
