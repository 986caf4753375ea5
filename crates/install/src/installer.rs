//! Main installer implementation

use crate::steps::{
    activate_version, choose_work_dir, ensure_dependencies, extract_bundle, fix_sandbox_helper,
    install_icon, mount_has_option, refresh_desktop_caches, resolve_install_root, stage_bundle,
    validate_source, write_desktop_entry, write_launcher, SandboxOutcome,
};
use crate::{derive_version, InstallContext, InstallReport};
use dockyard_config::{constants::FALLBACK_WORK_DIR, Config, HomeLayout};
use dockyard_errors::{Error, UserFacingError};
use dockyard_events::{EventEmitter, FailureContext, InstallEvent, InstallStep};
use dockyard_platform::{Platform, PlatformContext};
use std::path::PathBuf;
use std::time::Instant;
use uuid::Uuid;

/// Main installer for desktop application bundles
pub struct Installer {
    /// Resolved configuration (file, environment and CLI flags already merged)
    config: Config,
    /// Home-relative locations
    layout: HomeLayout,
    platform: Platform,
}

impl std::fmt::Debug for Installer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer")
            .field("config", &self.config)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

/// Warnings collected while advisory steps fail
struct Advisories<'a> {
    ctx: &'a PlatformContext,
    messages: Vec<String>,
}

impl Advisories<'_> {
    fn warn(&mut self, message: String, hint: Option<&str>) {
        tracing::warn!(%message, "advisory step failed");
        match hint {
            Some(hint) => self.ctx.emit_warning_with_context(message.clone(), hint),
            None => self.ctx.emit_warning(message.clone()),
        }
        self.messages.push(message);
    }
}

impl Installer {
    /// Create new installer
    #[must_use]
    pub fn new(config: Config, layout: HomeLayout, platform: Platform) -> Self {
        Self {
            config,
            layout,
            platform,
        }
    }

    /// Resolved configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Install a bundle
    ///
    /// Missing sources and extraction failures abort the run, as does any
    /// filesystem failure while laying out the version directory, the
    /// `current` link, the launcher or the desktop entry. Dependency
    /// installation, mount checks, the sandbox helper fix-up, a missing icon
    /// and cache refreshes only add warnings to the report.
    ///
    /// Every event of one call carries the same fresh correlation id.
    ///
    /// # Errors
    ///
    /// Returns the error of the first fatal step; an `InstallEvent::Failed`
    /// naming that step is emitted first.
    pub async fn install(&self, context: InstallContext) -> Result<InstallReport, Error> {
        let run_id = Uuid::new_v4().to_string();
        tracing::debug!(run_id = %run_id, bundle = %context.bundle.display(), "install run");
        let ctx = PlatformContext::new(context.event_sender.clone()).with_correlation_id(run_id);
        let mut step = InstallStep::Validate;

        match self.run(&ctx, &context, &mut step).await {
            Ok(report) => Ok(report),
            Err(err) => {
                tracing::error!(step = step.as_str(), error = %err, "installation failed");
                ctx.emit_install(InstallEvent::Failed {
                    name: self.config.install.name.clone(),
                    step,
                    failure: FailureContext::from_error(&err),
                });
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        ctx: &PlatformContext,
        context: &InstallContext,
        step: &mut InstallStep,
    ) -> Result<InstallReport, Error> {
        let start = Instant::now();
        let platform = &self.platform;
        let layout = &self.layout;
        let settings = &self.config.install;
        let bundle_settings = &self.config.bundle;
        let name = settings.name.clone();
        let slug = self.config.slug();
        let mut advisories = Advisories {
            ctx,
            messages: Vec::new(),
        };

        let cwd = if context.cwd.as_os_str().is_empty() {
            std::env::current_dir()?
        } else {
            context.cwd.clone()
        };

        *step = InstallStep::Validate;
        let bundle = validate_source(platform, ctx, layout, &context.bundle, &cwd).await?;
        let version = derive_version(&bundle)?;
        ctx.emit_install(InstallEvent::Started {
            name: name.clone(),
            bundle: bundle.clone(),
            version: version.clone(),
        });

        if platform.which("findmnt").await.is_err() {
            ctx.emit_notice("findmnt not found; continuing without mount option checks");
        }

        *step = InstallStep::Dependencies;
        if settings.skip_dependencies {
            ctx.emit_install(InstallEvent::DependenciesSkipped);
        } else {
            let packages = settings.dependency_packages.clone();
            ctx.emit_install(InstallEvent::DependenciesInstalling {
                packages: packages.clone(),
            });
            match ensure_dependencies(platform, ctx, &packages).await {
                Ok(()) => ctx.emit_install(InstallEvent::DependenciesInstalled { packages }),
                Err(e) => advisories.warn(
                    format!("dependency installation failed: {}", e.user_message()),
                    Some("rerun with --no-apt to skip dependency installation"),
                ),
            }
        }

        *step = InstallStep::ResolveRoot;
        let root = resolve_install_root(
            platform,
            ctx,
            &self.config,
            layout,
            context.system_dir,
            &cwd,
        )
        .await?;
        ctx.emit_install(InstallEvent::InstallRootResolved {
            install_root: root.path.clone(),
            system: root.system,
        });

        *step = InstallStep::MountCheck;
        if mount_has_option(platform, ctx, &root.parent, "nosuid").await {
            if root.system {
                advisories.warn(
                    format!(
                        "{} is mounted nosuid; the setuid sandbox may fail",
                        root.parent.display()
                    ),
                    None,
                );
            } else {
                advisories.warn(
                    format!(
                        "target filesystem has 'nosuid': {}",
                        root.parent.display()
                    ),
                    Some(
                        format!(
                            "consider rerunning with --system-dir (uses {})",
                            self.config.system_install_root().display()
                        )
                        .as_str(),
                    ),
                );
            }
        }

        *step = InstallStep::Stage;
        let work = choose_work_dir(
            platform,
            ctx,
            &layout.work_dir(),
            &root.parent.join(FALLBACK_WORK_DIR),
        )
        .await?;
        if work.fell_back {
            advisories.warn(
                format!(
                    "{} is mounted noexec; staging in {}",
                    layout.work_dir().display(),
                    work.path.display()
                ),
                None,
            );
        }
        let staged = stage_bundle(platform, ctx, &bundle, &work.path).await?;
        ctx.emit_install(InstallEvent::BundleStaged {
            staged: staged.clone(),
        });

        *step = InstallStep::Extract;
        ctx.emit_install(InstallEvent::ExtractionStarted {
            bundle: staged.clone(),
        });
        let version_dir =
            extract_bundle(platform, ctx, &staged, &root.path, &version, bundle_settings).await?;
        ctx.emit_install(InstallEvent::VersionInstalled {
            version: version.clone(),
            path: version_dir.clone(),
        });

        *step = InstallStep::SandboxHelper;
        let mut sandbox_fixed = false;
        match fix_sandbox_helper(platform, ctx, &version_dir, &bundle_settings.sandbox_helper).await
        {
            Ok(SandboxOutcome::Fixed(path)) => {
                sandbox_fixed = true;
                ctx.emit_install(InstallEvent::SandboxHelperFixed { path });
            }
            Ok(SandboxOutcome::Missing(_)) => advisories.warn(
                format!(
                    "{} not found; the app may still run with the user-namespace sandbox",
                    bundle_settings.sandbox_helper
                ),
                None,
            ),
            Err(e) => advisories.warn(
                format!("failed to set sandbox helper permissions: {}", e.user_message()),
                Some("the app may fall back to a weaker sandbox; rerun the installer to retry"),
            ),
        }

        *step = InstallStep::Activate;
        let current_link = activate_version(platform, ctx, &root.path, &version_dir).await?;
        ctx.emit_install(InstallEvent::VersionActivated {
            link: current_link.clone(),
            target: version.clone(),
        });

        *step = InstallStep::Launcher;
        let launcher =
            write_launcher(platform, ctx, layout, &slug, &root.path, bundle_settings).await?;
        ctx.emit_install(InstallEvent::LauncherWritten {
            path: launcher.clone(),
        });

        let mut desktop_entry: Option<PathBuf> = None;
        let mut icon: Option<PathBuf> = None;
        if settings.make_desktop {
            *step = InstallStep::Icon;
            let outcome = install_icon(
                platform,
                ctx,
                layout,
                &slug,
                &version_dir,
                &bundle_settings.icon_resource,
            )
            .await?;
            if outcome.copied {
                ctx.emit_install(InstallEvent::IconInstalled {
                    path: outcome.path.clone(),
                });
            } else {
                advisories.warn(
                    format!(
                        "no {} found; place a 256x256 PNG at {}",
                        bundle_settings.icon_resource,
                        outcome.path.display()
                    ),
                    None,
                );
            }

            *step = InstallStep::DesktopEntry;
            let entry = write_desktop_entry(
                platform,
                ctx,
                layout,
                &name,
                &launcher,
                &outcome.path,
                &self.config.desktop,
            )
            .await?;
            ctx.emit_install(InstallEvent::DesktopEntryWritten {
                path: entry.clone(),
            });

            *step = InstallStep::CacheRefresh;
            let tools = refresh_desktop_caches(platform, ctx, layout).await;
            if !tools.is_empty() {
                ctx.emit_install(InstallEvent::CachesRefreshed { tools });
            }

            desktop_entry = Some(entry);
            icon = Some(outcome.path);
        }

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        ctx.emit_install(InstallEvent::Completed {
            name: name.clone(),
            version: version.clone(),
            install_root: root.path.clone(),
            duration_ms,
        });

        Ok(InstallReport {
            name,
            version,
            install_root: root.path,
            version_dir,
            current_link,
            launcher,
            desktop_entry,
            icon,
            warnings: advisories.messages,
            sandbox_fixed,
            duration_ms,
        })
    }
}
