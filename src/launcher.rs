//! Scheduler invocation.
//!
//! Submits the generated job file by running `<scheduler> <output>` through
//! the platform shell, the same way a user would type it. The child inherits
//! stdio and the environment and is waited on without a timeout.

use crate::error::{EnvJobError, Result};
use std::borrow::Cow;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Scheduler command used when none is configured.
pub const DEFAULT_SCHEDULER_COMMAND: &str = "nomad job run";

/// Result of running the scheduler command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// The full shell command that was executed.
    pub command: String,
    /// Exit code of the shell (None if terminated by a signal).
    pub exit_code: Option<i32>,
}

impl LaunchOutcome {
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Human-readable exit status for log and error messages.
    pub fn describe_status(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Build the shell command line that submits `output`.
///
/// The path is quoted for the shell that will run it, which leaves ordinary
/// file names like `generated_escrow.nomad.hcl` untouched.
pub fn build_command(scheduler: &str, output: &Path) -> String {
    let output = output.to_string_lossy();
    format!("{} {}", scheduler.trim_end(), quote_path(&output))
}

/// POSIX `sh` quoting.
#[cfg(unix)]
fn quote_path(path: &str) -> Cow<'_, str> {
    shell_words::quote(path)
}

/// `cmd.exe` has no single quotes; wrap in double quotes when the path holds
/// whitespace or a metacharacter. Windows paths cannot contain `"`.
#[cfg(windows)]
fn quote_path(path: &str) -> Cow<'_, str> {
    const SPECIAL: &[char] = &['&', '|', '<', '>', '^', '(', ')', '%', '!', ',', ';', '='];

    if path.is_empty() || path.chars().any(|c| c.is_whitespace() || SPECIAL.contains(&c)) {
        Cow::Owned(format!("\"{}\"", path))
    } else {
        Cow::Borrowed(path)
    }
}

/// Run `command` through the platform shell and wait for it to finish.
///
/// # Errors
///
/// Returns `EnvJobError::Launch` only if the shell itself could not be
/// started. A non-zero exit is reported in the outcome, not as an error.
pub fn launch(command: &str) -> Result<LaunchOutcome> {
    tracing::info!(command, "launching scheduler");

    let status = shell(command).status().map_err(|e| {
        EnvJobError::Launch(format!(
            "failed to run '{}': {}\n\
             Fix: ensure a shell is available and the scheduler is in PATH.",
            command, e
        ))
    })?;

    let outcome = outcome_from_status(command, status);
    tracing::debug!(status = %outcome.describe_status(), "scheduler exited");
    Ok(outcome)
}

fn outcome_from_status(command: &str, status: ExitStatus) -> LaunchOutcome {
    LaunchOutcome {
        command: command.to_string(),
        exit_code: status.code(),
    }
}

#[cfg(unix)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
