//! Installation system error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum InstallError {
    #[error("bundle not found: {path}")]
    SourceNotFound { path: String },

    #[error("extraction failed: {message}")]
    ExtractionFailed { message: String },

    #[error("bundle exited with status {status}: {message}")]
    BundleExecutionFailed { status: String, message: String },

    #[error("staging failed for {path}: {message}")]
    StagingFailed { path: String, message: String },

    #[error("filesystem operation failed: {operation} on {path}: {message}")]
    FilesystemError {
        operation: String,
        path: String,
        message: String,
    },

    #[error("could not activate version {version}: {message}")]
    ActivationFailed { version: String, message: String },

    #[error("home directory could not be determined")]
    HomeNotFound,

    #[error("temporary file error: {message}")]
    TempFileError { message: String },
}

impl UserFacingError for InstallError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::SourceNotFound { .. } => Some("Check the bundle path and try again."),
            Self::ExtractionFailed { .. } | Self::BundleExecutionFailed { .. } => Some(
                "Make sure the file is a self-extracting bundle and that the cache directory allows execution.",
            ),
            Self::StagingFailed { .. } => {
                Some("Ensure ~/.cache is writable and not mounted noexec.")
            }
            Self::ActivationFailed { .. } => {
                Some("Remove the stale `current` link in the install directory and rerun.")
            }
            Self::HomeNotFound => Some("Set the HOME environment variable."),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::TempFileError { .. } | Self::StagingFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::SourceNotFound { .. } => "install.source_not_found",
            Self::ExtractionFailed { .. } => "install.extraction_failed",
            Self::BundleExecutionFailed { .. } => "install.bundle_execution_failed",
            Self::StagingFailed { .. } => "install.staging_failed",
            Self::FilesystemError { .. } => "install.filesystem_error",
            Self::ActivationFailed { .. } => "install.activation_failed",
            Self::HomeNotFound => "install.home_not_found",
            Self::TempFileError { .. } => "install.temp_file_error",
        };
        Some(code)
    }
}
