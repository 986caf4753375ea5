use dockyard_events::EventSender;
use std::path::PathBuf;

/// Per-run installation request
///
/// Name, install directory and desktop settings come from the resolved
/// configuration; this carries what only the invocation knows.
#[derive(Clone, Debug)]
pub struct InstallContext {
    /// Bundle path as given on the command line (may be relative or `~`-prefixed)
    pub bundle: PathBuf,
    /// Directory relative paths are resolved against; empty means the process cwd
    pub cwd: PathBuf,
    /// Install into the privileged system prefix instead of the user directory
    pub system_dir: bool,

    /// Event sender for progress reporting
    pub event_sender: Option<EventSender>,
}

context_builder! {
    InstallContext {
        bundle: PathBuf,
        cwd: PathBuf,
        system_dir: bool,
    }
}
