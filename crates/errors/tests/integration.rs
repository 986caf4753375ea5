//! Integration tests for error types

#[cfg(test)]
mod tests {
    use dockyard_errors::*;

    #[test]
    fn test_error_conversion() {
        let install_err = InstallError::SourceNotFound {
            path: "/tmp/App-1.0.0.AppImage".into(),
        };
        let err: Error = install_err.into();
        assert!(matches!(err, Error::Install(_)));
    }

    #[test]
    fn test_error_display() {
        let err = InstallError::ExtractionFailed {
            message: "squashfs-root not found".into(),
        };
        assert_eq!(err.to_string(), "extraction failed: squashfs-root not found");
    }

    #[test]
    fn test_error_clone() {
        let err = GitConfigError::InvalidDirectory { path: "/".into() };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io_with_path(&io_err, "/opt/app");
        match err {
            Error::Io {
                kind,
                message,
                path,
            } => {
                assert_eq!(kind, std::io::ErrorKind::PermissionDenied);
                assert!(message.starts_with("/opt/app"));
                assert_eq!(path, Some(std::path::PathBuf::from("/opt/app")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_user_facing_codes_and_hints() {
        let err: Error = InstallError::SourceNotFound {
            path: "missing".into(),
        }
        .into();
        assert_eq!(err.user_code(), Some("install.source_not_found"));
        assert!(err.user_hint().is_some());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_command_failure_uses_stderr_in_message() {
        let err = PlatformError::CommandFailed {
            command: "sudo".into(),
            status: "exit status: 1".into(),
            stderr: "sudo: a password is required\n".into(),
        };
        assert_eq!(err.user_message(), "sudo failed: sudo: a password is required");
    }
}
