//! External command execution.
//!
//! Every query the collector makes goes through a `CommandRunner`, so the
//! collector can be exercised with scripted output in tests.

use std::time::Duration;

use async_trait::async_trait;
use odoo_tuner_core::CollectionError;
use tokio::process::Command;
use tracing::{debug, warn};

/// Captured result of one command run. Output is lossily decoded and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`. A non-zero exit is not an error; callers
    /// decide whether the captured stdout is still usable.
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, CollectionError>;
}

/// Runs real processes with a per-command timeout.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, CollectionError> {
        let command_line = display_command(program, args);
        debug!(command = %command_line, "Running command");

        let mut command = Command::new(program);
        command.args(args).kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(CollectionError::CommandFailed {
                    command: command_line,
                    message: e.to_string(),
                })
            }
            Err(_) => {
                return Err(CollectionError::CommandTimedOut {
                    command: command_line,
                    timeout_secs: self.timeout.as_secs(),
                })
            }
        };

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        };

        if !result.success() {
            warn!(
                command = %command_line,
                status = ?result.status,
                stderr = %result.stderr,
                "Command exited unsuccessfully"
            );
        }

        Ok(result)
    }
}

pub(crate) fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
