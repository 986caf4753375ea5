#![warn(clippy::pedantic)]
#![deny(clippy::all)]

//! Bundle installation for dockyard
//!
//! This crate installs self-extracting desktop application bundles into a
//! versioned install root with a `current` link, and wires up the launcher
//! wrapper, icon and desktop entry. Each step is a public function in
//! [`steps`]; [`Installer`] runs them in order and decides which failures
//! are fatal.

#[macro_use]
mod macros;
mod api;
mod installer;
pub mod steps;
pub mod version;

pub use installer::Installer;
pub use version::derive_version;

pub use api::context::InstallContext;
pub use api::report::InstallReport;

pub use steps::{
    activate_version, choose_work_dir, ensure_dependencies, extract_bundle, fix_sandbox_helper,
    install_icon, mount_has_option, refresh_desktop_caches, render_desktop_entry,
    render_launcher, resolve_install_root, stage_bundle, validate_source, write_desktop_entry,
    write_launcher, IconOutcome, InstallRoot, SandboxOutcome, WorkDir,
};

// Re-export EventSender for use by macros and contexts
pub use dockyard_events::EventSender;
