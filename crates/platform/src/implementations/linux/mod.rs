//! Linux platform implementation

pub mod filesystem;
pub mod process;

/// Linux platform implementation
pub struct LinuxPlatform;

impl LinuxPlatform {
    /// Create a new Linux platform instance
    #[allow(clippy::new_ret_no_self)]
    #[must_use]
    pub fn new() -> crate::core::Platform {
        use filesystem::LinuxFilesystemOperations;
        use process::LinuxProcessOperations;

        crate::core::Platform::new(
            Box::new(LinuxFilesystemOperations::new()),
            Box::new(LinuxProcessOperations::new()),
        )
    }
}
