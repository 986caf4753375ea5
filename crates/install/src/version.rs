//! Version strings taken from bundle file names

use dockyard_config::constants::VERSION_PLACEHOLDER;
use dockyard_errors::Error;
use regex::Regex;
use std::path::Path;

/// First dotted three-part number in the file name, or `unknown`
///
/// `Cursor-1.4.3-x86_64.AppImage` yields `1.4.3`. Only the final path
/// component is inspected, so digits in parent directories never leak in.
///
/// # Errors
///
/// Returns an internal error if the version pattern fails to compile.
pub fn derive_version(bundle: &Path) -> Result<String, Error> {
    let version_regex = Regex::new(r"\d+\.\d+\.\d+")
        .map_err(|e| Error::internal(format!("Failed to compile regex: {e}")))?;

    let file_name = bundle
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(version_regex
        .find(&file_name)
        .map_or_else(|| VERSION_PLACEHOLDER.to_string(), |m| m.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(path: &str) -> String {
        derive_version(Path::new(path)).unwrap()
    }

    #[test]
    fn picks_first_three_part_version() {
        assert_eq!(version("/tmp/Cursor-1.4.3-x86_64.AppImage"), "1.4.3");
        assert_eq!(version("App-2.1.0-x86_64.bundle"), "2.1.0");
        assert_eq!(version("tool-10.20.30.40.bin"), "10.20.30");
    }

    #[test]
    fn falls_back_to_placeholder() {
        assert_eq!(version("Cursor-latest.AppImage"), "unknown");
        assert_eq!(version("app-1.2.AppImage"), "unknown");
        assert_eq!(version("/opt/1.2.3/app.AppImage"), "unknown");
    }
}
