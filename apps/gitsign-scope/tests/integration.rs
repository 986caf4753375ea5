//! Integration tests for the gitsign-scope CLI

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Run the binary with piped answers and `HOME` pointed at `home`
fn gitsign_scope(home: &Path, answers: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_gitsign-scope"))
        .current_dir(home)
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn gitsign-scope");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(answers.as_bytes())
        .expect("Failed to write answers");

    child.wait_with_output().expect("Failed to wait for gitsign-scope")
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_gitsign-scope"))
        .arg("--version")
        .output()
        .expect("Failed to execute gitsign-scope");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("gitsign-scope"));
}

#[test]
fn test_rejects_unknown_arguments() {
    let output = Command::new(env!("CARGO_BIN_EXE_gitsign-scope"))
        .arg("--scope")
        .output()
        .expect("Failed to execute gitsign-scope");

    assert!(!output.status.success());
}

#[test]
fn test_piped_setup_and_rerun() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir(home.path().join("work")).unwrap();
    let scope = home.path().join("work").canonicalize().unwrap();

    // Blank directory answer is asked again; blank email is omitted
    let output = gitsign_scope(home.path(), "\n~/work\nABC123\nAda\n\n");
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout
            .matches("Enter the full path to the parent folder where Git repos live")
            .count(),
        2
    );
    assert!(stdout.contains("Appended include block to"));

    let fragment_path = home.path().join(".gitconfig-work");
    let fragment = std::fs::read_to_string(&fragment_path).unwrap();
    assert_eq!(
        fragment,
        "[user]\n\tsigningkey = ABC123\n\tname = Ada\n[commit]\n\tgpgsign = true\n"
    );

    let block = format!(
        "[includeIf \"gitdir:{}/\"]\n\tpath = {}\n",
        scope.display(),
        fragment_path.display()
    );
    let global = std::fs::read_to_string(home.path().join(".gitconfig")).unwrap();
    assert_eq!(global.matches(&block).count(), 1);

    // Same directory spelled differently, new key
    let answers = format!("{}/\nDEF456\n\n\n", scope.display());
    let output = gitsign_scope(home.path(), &answers);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout)
        .contains("Include block already exists in .gitconfig"));

    let fragment = std::fs::read_to_string(&fragment_path).unwrap();
    assert!(fragment.contains("signingkey = DEF456"));
    assert!(!fragment.contains("name ="));
    let global = std::fs::read_to_string(home.path().join(".gitconfig")).unwrap();
    assert_eq!(global.matches(&block).count(), 1);
}

#[test]
fn test_closed_input_fails() {
    let home = TempDir::new().unwrap();

    let output = gitsign_scope(home.path(), "~/work\n");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
    assert!(!home.path().join(".gitconfig").exists());
}
