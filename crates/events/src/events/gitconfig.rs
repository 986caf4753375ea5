use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Scoped signing configuration events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GitConfigEvent {
    /// Scoped fragment written (overwrites any previous one)
    FragmentWritten { path: PathBuf },

    /// Include block appended to the global config
    IncludeAppended { config_path: PathBuf },

    /// The identical include block was already present
    IncludeAlreadyPresent { config_path: PathBuf },
}
