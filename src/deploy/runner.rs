//! Command runner seam.
//!
//! External tools are invoked through the [`CommandRunner`] trait so the
//! orchestration logic can be exercised against a mocked runner. The real
//! implementation spawns the process with piped output and maps launch
//! failures and signal terminations to typed errors; a non-zero exit status
//! is returned to the caller, which decides whether it is an error.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{PlatformError, Result, ToolError};

/// A fully-specified external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to invoke.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Working directory; inherited when absent.
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Creates a command specification.
    #[must_use]
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|s| (*s).to_string()).collect(),
            cwd: None,
        }
    }

    /// Sets the working directory.
    #[must_use]
    pub fn current_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit status code.
    pub status: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Returns true when the command exited with status zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.status == 0
    }

    /// Maps a non-zero exit status to a [`ToolError::Failed`].
    ///
    /// # Errors
    ///
    /// Returns an error carrying the exit status and captured stderr.
    pub fn ensure_success(self, tool: &str) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(PlatformError::Tool(ToolError::failed(
                tool,
                self.status,
                self.stderr.trim(),
            )))
        }
    }
}

/// Executes external commands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs a command to completion, capturing its output.
    ///
    /// # Errors
    ///
    /// Returns an error when the program cannot be launched or is
    /// terminated by a signal. A non-zero exit status is not an error at
    /// this layer.
    async fn run(&self, spec: CommandSpec) -> Result<CommandOutput>;
}

/// Runner that spawns real processes via tokio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Creates a new process runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, spec: CommandSpec) -> Result<CommandOutput> {
        debug!("Running: {spec}");

        let mut command = tokio::process::Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(cwd) = &spec.cwd {
            command.current_dir(cwd);
        }

        let output = command.output().await.map_err(|e| {
            PlatformError::Tool(ToolError::NotFound {
                tool: spec.program.clone(),
                message: e.to_string(),
            })
        })?;

        let Some(status) = output.status.code() else {
            return Err(PlatformError::Tool(ToolError::Terminated {
                tool: spec.program,
            }));
        };

        debug!("{} exited with status {status}", spec.program);

        Ok(CommandOutput {
            status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
