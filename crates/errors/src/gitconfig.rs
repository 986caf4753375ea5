//! Git configuration writer error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum GitConfigError {
    #[error("failed to read answer for '{prompt}': {message}")]
    PromptFailed { prompt: String, message: String },

    #[error("directory has no usable final segment: {path}")]
    InvalidDirectory { path: String },

    #[error("failed to write {path}: {message}")]
    WriteFailed { path: String, message: String },

    #[error("failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },
}

impl UserFacingError for GitConfigError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidDirectory { .. } => {
                Some("Pick a folder below the filesystem root, e.g. ~/work.")
            }
            Self::WriteFailed { .. } | Self::ReadFailed { .. } => {
                Some("Check permissions on your home directory and ~/.gitconfig.")
            }
            Self::PromptFailed { .. } => Some("Run the command from an interactive terminal."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::PromptFailed { .. } => "gitconfig.prompt_failed",
            Self::InvalidDirectory { .. } => "gitconfig.invalid_directory",
            Self::WriteFailed { .. } => "gitconfig.write_failed",
            Self::ReadFailed { .. } => "gitconfig.read_failed",
        };
        Some(code)
    }
}
