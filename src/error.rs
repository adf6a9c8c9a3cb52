//! Error types for the envjob CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for envjob operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum EnvJobError {
    /// The configuration file or a flag value is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The env file could not be read.
    #[error("{0}")]
    EnvFile(String),

    /// The job template could not be read.
    #[error("{0}")]
    Template(String),

    /// The generated job specification could not be written.
    #[error("{0}")]
    Output(String),

    /// Strict mode: the template does not contain the placeholder token.
    #[error("placeholder '{placeholder}' not found in template '{template}'")]
    PlaceholderMissing {
        placeholder: String,
        template: String,
    },

    /// The scheduler shell could not be spawned.
    #[error("Scheduler launch failed: {0}")]
    Launch(String),

    /// Strict mode: the scheduler exited unsuccessfully.
    #[error("Scheduler command '{command}' failed: {status}")]
    SchedulerFailed { command: String, status: String },
}

impl EnvJobError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            EnvJobError::Config(_) => exit_codes::CONFIG_ERROR,
            EnvJobError::EnvFile(_) | EnvJobError::Template(_) => exit_codes::INPUT_ERROR,
            EnvJobError::Output(_) => exit_codes::OUTPUT_ERROR,
            EnvJobError::PlaceholderMissing { .. } => exit_codes::PLACEHOLDER_MISSING,
            EnvJobError::Launch(_) | EnvJobError::SchedulerFailed { .. } => {
                exit_codes::LAUNCH_FAILURE
            }
        }
    }
}

/// Result type alias for envjob operations.
pub type Result<T> = std::result::Result<T, EnvJobError>;
