//! Prepared command execution with configurable verbosity.
//!
//! Execution is synchronous and blocking: no timeout is enforced and a
//! running command cannot be cancelled. A hung external command blocks
//! the calling thread indefinitely.

use crate::error::{Result, ToolshedError};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// How much command output reaches the parent process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Capture everything, surface nothing.
    Silent,

    /// Capture everything, replay stderr through the log only when the
    /// command fails.
    #[default]
    OnError,

    /// Stream stdout/stderr through to the parent.
    Verbose,
}

/// An external command prepared for execution.
///
/// The program may be a bare name (resolved through the parent's search
/// path by the operating system) or an absolute path. Callers that want
/// resolution against an explicit [`crate::SearchContext`] resolve first
/// and pass the absolute path here.
#[derive(Debug, Clone)]
pub struct PreparedCommand {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
    verbosity: Verbosity,
}

impl PreparedCommand {
    /// Prepare a command without running it.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
            verbosity: Verbosity::default(),
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append arguments. Empty arguments are dropped, which keeps call
    /// sites free of conditionals for flags that are sometimes absent.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args
            .extend(args.into_iter().map(Into::into).filter(|a| !a.is_empty()));
        self
    }

    /// Set the working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Add an environment variable for the child process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Set the output verbosity.
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// The command line as a display string.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Run the command, discarding stdout.
    pub fn run(&self) -> Result<()> {
        match self.verbosity {
            Verbosity::Verbose => {
                let status = self
                    .build(Stdio::inherit(), Stdio::inherit())
                    .status()
                    .map_err(|_| self.spawn_error())?;
                if status.success() {
                    Ok(())
                } else {
                    Err(self.exit_error(status.code()))
                }
            }
            _ => self.output().map(|_| ()),
        }
    }

    /// Run the command and return its captured stdout with the trailing
    /// newline trimmed.
    pub fn output(&self) -> Result<String> {
        let stderr = match self.verbosity {
            Verbosity::Verbose => Stdio::inherit(),
            _ => Stdio::piped(),
        };

        let output = self
            .build(Stdio::piped(), stderr)
            .output()
            .map_err(|_| self.spawn_error())?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.strip_suffix('\n').unwrap_or(&stdout).to_string();

        if output.status.success() {
            return Ok(stdout);
        }

        if self.verbosity == Verbosity::OnError {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim_end();
            if !stderr.is_empty() {
                tracing::warn!("{}: {}", self.display(), stderr);
            }
        }

        Err(self.exit_error(output.status.code()))
    }

    fn build(&self, stdout: Stdio, stderr: Stdio) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(stdout);
        cmd.stderr(stderr);
        cmd
    }

    fn spawn_error(&self) -> ToolshedError {
        ToolshedError::CommandFailed {
            command: self.display(),
            code: None,
        }
    }

    fn exit_error(&self, code: Option<i32>) -> ToolshedError {
        ToolshedError::CommandFailed {
            command: self.display(),
            code,
        }
    }
}

/// Run `program args...`, only replaying stderr when the command fails.
pub fn run(program: &str, args: &[&str]) -> Result<()> {
    PreparedCommand::new(program).args(args.iter().copied()).run()
}

/// Capture stdout from `program args...` without surfacing any output.
pub fn output(program: &str, args: &[&str]) -> Result<String> {
    PreparedCommand::new(program)
        .args(args.iter().copied())
        .verbosity(Verbosity::Silent)
        .output()
}

/// Run `program args...` in `dir`.
pub fn run_in(dir: &Path, program: &str, args: &[&str]) -> Result<()> {
    PreparedCommand::new(program)
        .args(args.iter().copied())
        .current_dir(dir)
        .run()
}
