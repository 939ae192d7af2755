//! Subprocess execution behind a trait so the pipeline can run against fakes.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// A single external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<OsString>,
    /// Discard stdout and stderr of the child.
    pub quiet: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            quiet: false,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Arguments rendered lossily, for logs and assertions.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

/// Exit state of a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    pub fn failure(code: Option<i32>) -> Self {
        Self {
            success: false,
            code,
        }
    }
}

/// Finished command together with its captured stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub outcome: CommandOutcome,
    pub stdout: String,
}

impl CapturedOutput {
    pub fn new(outcome: CommandOutcome, stdout: impl Into<String>) -> Self {
        Self {
            outcome,
            stdout: stdout.into(),
        }
    }
}

/// Executable lookup and blocking execution of external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Resolves `program` on the search path, or checks it directly when it
    /// contains a path separator.
    fn resolve(&self, program: &str) -> Option<PathBuf>;

    /// Runs the command to completion. `Err` means it could not be started.
    fn run(&self, command: &CommandSpec) -> io::Result<CommandOutcome>;

    /// Runs the command to completion and returns its stdout. Stderr is
    /// discarded regardless of `quiet`.
    fn capture(&self, command: &CommandSpec) -> io::Result<CapturedOutput>;
}

/// Runs commands as real child processes of the current process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn run(&self, command: &CommandSpec) -> io::Result<CommandOutcome> {
        debug!(
            program = %command.program,
            args = ?command.args_lossy(),
            "Running command"
        );

        let mut child = Command::new(&command.program);
        child.args(&command.args).stdin(Stdio::null());
        if command.quiet {
            child.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = child.status()?;
        debug!(program = %command.program, status = %status, "Command finished");

        Ok(CommandOutcome {
            success: status.success(),
            code: status.code(),
        })
    }

    fn capture(&self, command: &CommandSpec) -> io::Result<CapturedOutput> {
        debug!(
            program = %command.program,
            args = ?command.args_lossy(),
            "Capturing command output"
        );

        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;

        Ok(CapturedOutput {
            outcome: CommandOutcome {
                success: output.status.success(),
                code: output.status.code(),
            },
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
