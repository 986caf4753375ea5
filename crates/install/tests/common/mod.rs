//! Scripted process layer shared by the installer tests

#![allow(dead_code)]

use async_trait::async_trait;
use dockyard_config::{Config, HomeLayout};
use dockyard_errors::{Error, PlatformError};
use dockyard_platform::implementations::linux::filesystem::LinuxFilesystemOperations;
use dockyard_platform::{CommandOutput, Platform, PlatformCommand, PlatformContext, ProcessOperations};
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Every command line the fake saw, program first
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Vec<String>>>>);

impl CallLog {
    pub fn all(&self) -> Vec<Vec<String>> {
        self.0.lock().unwrap().clone()
    }

    pub fn contains(&self, expected: &[&str]) -> bool {
        self.all()
            .iter()
            .any(|call| call.iter().map(String::as_str).eq(expected.iter().copied()))
    }

    pub fn count_program(&self, program: &str) -> usize {
        self.all().iter().filter(|call| call[0] == program).count()
    }
}

/// Stands in for `sudo`, `findmnt` and the bundle's self-extraction
pub struct ScriptedProcess {
    log: CallLog,
    /// stdout of `findmnt`; `None` makes it fail
    pub findmnt_options: Option<String>,
    pub sudo_fails: bool,
    /// Whether running the bundle produces a `squashfs-root`
    pub extract_creates: bool,
    pub bundle_exit: i32,
    pub ship_sandbox: bool,
    pub ship_icon: bool,
    /// Programs `which` can find
    pub on_path: Vec<String>,
    /// Programs that exit with status 1
    pub failing: Vec<String>,
}

impl ScriptedProcess {
    pub fn new() -> Self {
        Self {
            log: CallLog::default(),
            findmnt_options: Some("rw,relatime\n".to_string()),
            sudo_fails: false,
            extract_creates: true,
            bundle_exit: 0,
            ship_sandbox: true,
            ship_icon: true,
            on_path: vec!["findmnt".to_string()],
            failing: Vec::new(),
        }
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    fn extract(&self, cwd: &Path) {
        if !self.extract_creates {
            return;
        }
        let root = cwd.join("squashfs-root");
        std::fs::create_dir_all(root.join("usr/bin")).unwrap();
        let binary = root.join("usr/bin/app");
        std::fs::write(&binary, "#!/bin/sh\necho app\n").unwrap();
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();
        std::os::unix::fs::symlink("usr/bin/app", root.join("AppRun")).unwrap();
        if self.ship_icon {
            std::fs::write(root.join(".DirIcon"), b"\x89PNG").unwrap();
        }
        if self.ship_sandbox {
            std::fs::write(root.join("chrome-sandbox"), b"elf").unwrap();
        }
    }
}

fn status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

fn output(code: i32, stdout: &str, stderr: &str) -> CommandOutput {
    CommandOutput {
        status: status(code),
        stdout: stdout.as_bytes().to_vec(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

#[async_trait]
impl ProcessOperations for ScriptedProcess {
    async fn execute_command(
        &self,
        _ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, Error> {
        let mut line = vec![cmd.program().to_string()];
        line.extend(cmd.get_args().iter().cloned());
        self.log.0.lock().unwrap().push(line);

        let result = match cmd.program() {
            program if self.failing.iter().any(|p| p == program) => {
                output(1, "", &format!("{program}: failed\n"))
            }
            "findmnt" => match &self.findmnt_options {
                Some(options) => output(0, options, ""),
                None => output(1, "", "findmnt: not a mount point"),
            },
            "sudo" if self.sudo_fails => output(1, "", "sudo: a password is required\n"),
            "sudo" => output(0, "", ""),
            _ if cmd.get_args().first().map(String::as_str) == Some("--appimage-extract") => {
                let cwd = cmd.get_current_dir().cloned().unwrap();
                let tmpdir = cmd
                    .get_env_vars()
                    .iter()
                    .find(|(key, _)| key == "TMPDIR")
                    .map(|(_, value)| PathBuf::from(value))
                    .unwrap();
                assert_eq!(tmpdir, cwd);
                self.extract(&cwd);
                output(self.bundle_exit, "", "")
            }
            _ => output(0, "", ""),
        };
        Ok(result)
    }

    fn create_command(&self, program: &str) -> PlatformCommand {
        PlatformCommand::new(program)
    }

    async fn which(&self, program: &str) -> Result<PathBuf, Error> {
        if self.on_path.iter().any(|p| p == program) {
            Ok(PathBuf::from("/usr/bin").join(program))
        } else {
            Err(PlatformError::CommandNotFound {
                command: program.to_string(),
            }
            .into())
        }
    }
}

pub fn platform(process: ScriptedProcess) -> Platform {
    Platform::new(
        Box::new(LinuxFilesystemOperations::new()),
        Box::new(process),
    )
}

/// Temporary home with a bundle file in `~/Downloads`
pub struct Fixture {
    pub home: TempDir,
    pub layout: HomeLayout,
    pub config: Config,
}

impl Fixture {
    pub fn new() -> Self {
        let home = TempDir::new().unwrap();
        let layout = HomeLayout::new(home.path());
        let mut config = Config::default();
        config.install.name = "App".to_string();
        Self {
            home,
            layout,
            config,
        }
    }

    pub fn bundle(&self, file_name: &str) -> PathBuf {
        let downloads = self.home.path().join("Downloads");
        std::fs::create_dir_all(&downloads).unwrap();
        let path = downloads.join(file_name);
        std::fs::write(&path, "bundle").unwrap();
        path
    }

    pub fn root(&self) -> PathBuf {
        self.home.path().join("Apps").join("app")
    }
}
