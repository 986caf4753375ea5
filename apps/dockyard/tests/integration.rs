//! Integration tests for the dockyard CLI

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const BUNDLE_SCRIPT: &str = r#"#!/bin/sh
if [ "$1" = "--appimage-extract" ]; then
  mkdir -p squashfs-root/usr/bin
  printf '#!/bin/sh\necho app\n' > squashfs-root/usr/bin/app
  chmod 755 squashfs-root/usr/bin/app
  ln -s usr/bin/app squashfs-root/AppRun
  printf 'png' > squashfs-root/.DirIcon
  exit 0
fi
exit 1
"#;

/// Run the binary with `HOME` pointed at `home` and a clean config environment
fn dockyard(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dockyard"))
        .args(args)
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("RUST_LOG")
        .env_remove("DOCKYARD_NAME")
        .env_remove("DOCKYARD_INSTALL_DIR")
        .env_remove("DOCKYARD_NO_APT")
        .env_remove("DOCKYARD_MAKE_DESKTOP")
        .output()
        .expect("Failed to execute dockyard")
}

fn write_bundle(dir: &Path, file_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, BUNDLE_SCRIPT).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_dockyard"))
        .arg("--version")
        .output()
        .expect("Failed to execute dockyard");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dockyard"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_dockyard"))
        .arg("--help")
        .output()
        .expect("Failed to execute dockyard");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--install-dir"));
    assert!(stdout.contains("--make-desktop"));
    assert!(stdout.contains("--system-dir"));
    assert!(stdout.contains("--no-apt"));
}

#[test]
fn test_missing_bundle_argument() {
    let output = Command::new(env!("CARGO_BIN_EXE_dockyard"))
        .output()
        .expect("Failed to execute dockyard");

    assert!(!output.status.success());
}

#[test]
fn test_missing_source_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("Cursor-1.4.3-x86_64.AppImage");

    let output = dockyard(home.path(), &[missing.to_str().unwrap(), "--no-apt"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bundle not found"), "{stderr}");
    assert!(stderr.contains("install.source_not_found"), "{stderr}");
    assert!(!home.path().join("Apps").exists());
}

#[test]
fn test_install_end_to_end() {
    let home = TempDir::new().unwrap();
    let bundle = write_bundle(home.path(), "App-2.1.0-x86_64.bundle");

    let output = dockyard(
        home.path(),
        &[bundle.to_str().unwrap(), "--name", "App", "--no-apt"],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "{stderr}");

    let root = home.path().join("Apps/app");
    assert!(root.join("2.1.0/AppRun").exists());
    assert_eq!(
        std::fs::read_link(root.join("current")).unwrap(),
        Path::new("2.1.0")
    );

    let launcher = home.path().join(".local/bin/app-launch");
    let mode = std::fs::metadata(&launcher).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);

    let entry =
        std::fs::read_to_string(home.path().join(".local/share/applications/app.desktop"))
            .unwrap();
    assert!(entry.contains(&format!("Exec={} %U", launcher.display())));
    assert!(home
        .path()
        .join(".local/share/icons/hicolor/256x256/apps/app.png")
        .exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("All set!"));
    assert!(stdout.contains("xprop WM_CLASS"));
}

#[test]
fn test_json_report_and_upgrade() {
    let home = TempDir::new().unwrap();
    let first = write_bundle(home.path(), "App-2.1.0-x86_64.bundle");
    let second = write_bundle(home.path(), "App-2.2.0-x86_64.bundle");

    let output = dockyard(
        home.path(),
        &["--json", first.to_str().unwrap(), "--name=App", "--no-apt", "--make-desktop=no"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let output = dockyard(
        home.path(),
        &["--json", second.to_str().unwrap(), "--name=App", "--no-apt", "--make-desktop=no"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["version"], "2.2.0");
    assert_eq!(report["name"], "App");
    assert!(report["desktop_entry"].is_null());

    let root = home.path().join("Apps/app");
    assert!(root.join("2.1.0/AppRun").exists());
    assert_eq!(
        std::fs::read_link(root.join("current")).unwrap(),
        Path::new("2.2.0")
    );
    assert!(!home
        .path()
        .join(".local/share/applications/app.desktop")
        .exists());
}
