//! Process launching
//!
//! Programs are always started from a structured [`Invocation`] (program plus
//! argument list). Nothing is ever handed to a shell, so group and item names
//! can contain any character.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::results::FailureReason;

/// Environment variable holding the runner root for every launched program
pub const ENV_ROOT: &str = "TASKDIR_ROOT";
/// Environment variable holding the task (group) being run
pub const ENV_TASK: &str = "TASKDIR_TASK";
/// Environment variable holding the relative path of the running item
pub const ENV_ITEM: &str = "TASKDIR_ITEM";

/// A program to start, with its arguments and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub current_dir: Option<PathBuf>,
    pub env: Vec<(String, OsString)>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: &str, value: impl Into<OsString>) -> Self {
        self.env.push((key.to_string(), value.into()));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

/// Captured result of a process that ran to completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Starts a program, blocks until it exits, and captures its output
pub trait ProcessLauncher {
    fn launch(&self, invocation: &Invocation) -> std::io::Result<ProcessOutput>;
}

/// [`ProcessLauncher`] backed by `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, invocation: &Invocation) -> std::io::Result<ProcessOutput> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).stdin(Stdio::null());
        if let Some(dir) = &invocation.current_dir {
            command.current_dir(dir);
        }
        for (key, value) in &invocation.env {
            command.env(key, value);
        }

        let output = command.output()?;
        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Builds invocations rooted at the runner root and hands them to a launcher
pub struct CommandExecutor<'a> {
    launcher: &'a dyn ProcessLauncher,
    root: &'a Path,
}

impl<'a> CommandExecutor<'a> {
    pub fn new(launcher: &'a dyn ProcessLauncher, root: &'a Path) -> Self {
        Self { launcher, root }
    }

    /// Run a script through `interpreter` with the script path as its only argument
    pub fn execute_script(
        &self,
        interpreter: &str,
        script_path: &Path,
        task: &str,
        item: &str,
    ) -> Result<ProcessOutput, FailureReason> {
        let invocation = Invocation::new(interpreter)
            .arg(script_path)
            .env(ENV_TASK, task)
            .env(ENV_ITEM, item);
        self.execute(invocation)
    }

    /// Run an executable file directly
    pub fn execute_binary(
        &self,
        binary_path: &Path,
        task: &str,
        item: &str,
    ) -> Result<ProcessOutput, FailureReason> {
        let invocation = Invocation::new(binary_path)
            .env(ENV_TASK, task)
            .env(ENV_ITEM, item);
        self.execute(invocation)
    }

    /// Run `<package_manager> install <package>@<version> [save_flag]`
    pub fn execute_install(
        &self,
        package_manager: &str,
        package: &str,
        version: &str,
        save_flag: Option<&str>,
    ) -> Result<ProcessOutput, FailureReason> {
        let mut invocation = Invocation::new(package_manager)
            .arg("install")
            .arg(format!("{}@{}", package, version));
        if let Some(flag) = save_flag {
            invocation = invocation.arg(flag);
        }
        self.execute(invocation)
    }

    /// Launch with the common working directory and environment.
    ///
    /// Only a failure to start is an `Err`; callers inspect `success` for the exit status.
    pub fn execute(&self, invocation: Invocation) -> Result<ProcessOutput, FailureReason> {
        let invocation = invocation
            .current_dir(self.root)
            .env(ENV_ROOT, self.root);

        log::debug!(
            "Launching {} {:?} in {}",
            invocation.program.display(),
            invocation.args,
            self.root.display()
        );

        self.launcher.launch(&invocation).map_err(|e| {
            log::warn!("Failed to launch {}: {}", invocation.program.display(), e);
            FailureReason::Launch(e.to_string())
        })
    }
}
