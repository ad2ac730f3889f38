//! External process execution
//!
//! Every stage of a run ends up here. The [`CommandRunner`] trait is what the
//! orchestrator talks to; [`SystemRunner`] is the real implementation.

use std::io;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::config::defaults::CAPTURE_LIMIT;
use crate::core::stage::Invocation;

/// How child stdout/stderr are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Child writes straight to the harness's own stdout/stderr
    #[default]
    Inherit,
    /// Child output is collected and returned with the outcome
    Capture,
}

/// What a finished process reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Whether the process exited with status zero
    pub success: bool,
    /// Exit code, `None` if terminated by a signal
    pub code: Option<i32>,
    /// Captured stdout, when capturing
    pub stdout: Option<String>,
    /// Captured stderr, when capturing
    pub stderr: Option<String>,
}

impl ProcessOutput {
    /// Outcome of a process that exited with `code`
    pub fn exited(code: i32) -> Self {
        Self {
            success: code == 0,
            code: Some(code),
            ..Self::default()
        }
    }
}

/// Runs one invocation to completion
///
/// Implementations block until the process exits. An `Err` means the process
/// could not be started at all; a non-zero exit is an `Ok` with `success == false`.
pub trait CommandRunner {
    /// Run `invocation` with `working_dir` as its current directory
    fn run(&mut self, invocation: &Invocation, working_dir: &Path) -> io::Result<ProcessOutput>;
}

/// Runs invocations as real child processes
#[derive(Debug, Default, Clone)]
pub struct SystemRunner {
    output_mode: OutputMode,
}

impl SystemRunner {
    /// Create a runner with the given output handling
    pub fn new(output_mode: OutputMode) -> Self {
        Self { output_mode }
    }

    fn command(invocation: &Invocation, working_dir: &Path) -> Command {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).current_dir(working_dir);
        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }
        cmd
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation, working_dir: &Path) -> io::Result<ProcessOutput> {
        tracing::debug!("Spawning `{}` in {}", invocation, working_dir.display());

        let mut cmd = Self::command(invocation, working_dir);
        match self.output_mode {
            OutputMode::Inherit => {
                let status = cmd.status()?;
                Ok(ProcessOutput {
                    success: status.success(),
                    code: status.code(),
                    stdout: None,
                    stderr: None,
                })
            }
            OutputMode::Capture => {
                let Output {
                    status,
                    stdout,
                    stderr,
                } = cmd.stdin(Stdio::null()).output()?;
                Ok(ProcessOutput {
                    success: status.success(),
                    code: status.code(),
                    stdout: Some(tail(&stdout, CAPTURE_LIMIT)),
                    stderr: Some(tail(&stderr, CAPTURE_LIMIT)),
                })
            }
        }
    }
}

/// Last `limit` bytes of `bytes`, lossily decoded
fn tail(bytes: &[u8], limit: usize) -> String {
    let start = bytes.len().saturating_sub(limit);
    String::from_utf8_lossy(&bytes[start..]).into_owned()
}
