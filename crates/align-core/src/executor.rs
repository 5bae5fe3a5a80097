//! Subprocess execution for external alignment tools.

use crate::error::{AdjustError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{info, warn};

/// Outcome of one external tool run.
///
/// The exit status is reported untouched; interpreting it is the caller's
/// business.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    /// Exit code, or -1 when the process was killed by a signal.
    pub exit_code: i32,

    /// Whether the process terminated with a zero exit status.
    pub success: bool,

    /// Captured stdout.
    pub stdout: String,

    /// Captured stderr.
    pub stderr: String,
}

impl ExecutionOutcome {
    /// Whether the run passed (exit code 0).
    pub fn passed(&self) -> bool {
        self.success && self.exit_code == 0
    }
}

/// Runs an external command in a work directory and reports its exit
/// status.
///
/// Implementations spawn and supervise the process and capture its output.
/// A nonzero exit is part of the outcome, never an error; errors are
/// reserved for spawn and I/O failures.
#[async_trait]
pub trait ProcessExecutor: Send + Sync {
    async fn execute(
        &self,
        work_dir: &Path,
        command: &[String],
        forward_output: bool,
    ) -> Result<ExecutionOutcome>;
}

/// `ProcessExecutor` backed by `tokio::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    /// Kill the child and fail when exceeded. Zero disables the limit.
    pub timeout_secs: u64,
}

impl CommandExecutor {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }
}

#[async_trait]
impl ProcessExecutor for CommandExecutor {
    async fn execute(
        &self,
        work_dir: &Path,
        command: &[String],
        forward_output: bool,
    ) -> Result<ExecutionOutcome> {
        let Some((exe, args)) = command.split_first() else {
            return Err(AdjustError::command("Empty command."));
        };

        let child = Command::new(exe)
            .args(args)
            .current_dir(work_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Reap the child if the timeout drops the wait future.
            .kill_on_drop(true)
            .spawn()?;

        let output = if self.timeout_secs > 0 {
            tokio::time::timeout(
                Duration::from_secs(self.timeout_secs),
                child.wait_with_output(),
            )
            .await
            .map_err(|_| {
                std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("command timed out after {} seconds", self.timeout_secs),
                )
            })??
        } else {
            child.wait_with_output().await?
        };

        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if forward_output {
            for line in stdout.lines() {
                info!("{line}");
            }
            for line in stderr.lines() {
                warn!("{line}");
            }
        }

        Ok(ExecutionOutcome {
            exit_code,
            success: output.status.success(),
            stdout,
            stderr,
        })
    }
}
