//! CLI argument parsing for envjob.
//!
//! Uses clap derive macros for declarative argument definitions. Every flag
//! is optional: a bare `envjob` reads `.env`, fills
//! `escrow_job_template.hcl`, writes `generated_escrow.nomad.hcl` and runs
//! `nomad job run` on it.

use crate::config::ConfigOverrides;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Envjob: render a Nomad job specification from a .env file and submit it.
///
/// Variables from the env file are written as `KEY = "VALUE"` lines in place
/// of the `{{ENV_VARS}}` token in the job template.
#[derive(Parser, Debug)]
#[command(name = "envjob")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML config file; flags given on the command line take precedence.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Env file with KEY=VALUE lines [default: .env].
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Job template containing the placeholder [default: escrow_job_template.hcl].
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Where to write the generated job [default: generated_escrow.nomad.hcl].
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Placeholder token replaced in the template [default: {{ENV_VARS}}].
    #[arg(long, value_name = "TOKEN")]
    pub placeholder: Option<String>,

    /// Spaces before each variable line after the first [default: 8].
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,

    /// Command the output path is appended to [default: "nomad job run"].
    #[arg(long, value_name = "CMD")]
    pub scheduler: Option<String>,

    /// Write the job file without running the scheduler.
    #[arg(long)]
    pub no_run: bool,

    /// Fail when the placeholder is missing or the scheduler exits non-zero.
    #[arg(long)]
    pub strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Config values set explicitly on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            env_file: self.env_file.clone(),
            template: self.template.clone(),
            output: self.output.clone(),
            placeholder: self.placeholder.clone(),
            indent: self.indent,
            scheduler_command: self.scheduler.clone(),
            skip_launch: self.no_run,
            strict: self.strict,
        }
    }
}
