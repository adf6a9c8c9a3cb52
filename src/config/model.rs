//! Config struct definition and default implementation.

use crate::fragment::CONTINUATION_INDENT;
use crate::launcher::DEFAULT_SCHEDULER_COMMAND;
use crate::template::DEFAULT_PLACEHOLDER;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a single envjob run.
///
/// Can be loaded from a YAML file passed with `--config`. Every field is
/// optional there; unknown fields are ignored. Paths are resolved relative to
/// the current working directory, not the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Inputs and output
    // =========================================================================
    /// Env file with `KEY=VALUE` lines (default: ".env").
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    /// Job template containing the placeholder (default: "escrow_job_template.hcl").
    #[serde(default = "default_template")]
    pub template: PathBuf,

    /// Generated job specification (default: "generated_escrow.nomad.hcl").
    #[serde(default = "default_output")]
    pub output: PathBuf,

    // =========================================================================
    // Rendering
    // =========================================================================
    /// Literal token in the template replaced by the env fragment.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Spaces before every fragment line after the first.
    #[serde(default = "default_indent")]
    pub indent: usize,

    // =========================================================================
    // Launching
    // =========================================================================
    /// Command the output path is appended to (default: "nomad job run").
    #[serde(default = "default_scheduler_command")]
    pub scheduler_command: String,

    /// Write the job file but do not run the scheduler.
    #[serde(default)]
    pub skip_launch: bool,

    /// Fail on a missing placeholder or an unsuccessful scheduler run
    /// instead of only logging a warning.
    #[serde(default)]
    pub strict: bool,
}

/// Values given on the command line, layered over a loaded config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub env_file: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub placeholder: Option<String>,
    pub indent: Option<usize>,
    pub scheduler_command: Option<String>,
    pub skip_launch: bool,
    pub strict: bool,
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

fn default_template() -> PathBuf {
    PathBuf::from("escrow_job_template.hcl")
}

fn default_output() -> PathBuf {
    PathBuf::from("generated_escrow.nomad.hcl")
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_indent() -> usize {
    CONTINUATION_INDENT
}

fn default_scheduler_command() -> String {
    DEFAULT_SCHEDULER_COMMAND.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env_file: default_env_file(),
            template: default_template(),
            output: default_output(),
            placeholder: default_placeholder(),
            indent: default_indent(),
            scheduler_command: default_scheduler_command(),
            skip_launch: false,
            strict: false,
        }
    }
}
