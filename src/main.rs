//! Envjob: render a Nomad job specification from a .env file and submit it.
//!
//! This is the main entry point for the `envjob` CLI. It parses arguments,
//! resolves the configuration, runs the pipeline, and maps errors to exit
//! codes.

mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod exit_codes;
pub mod fragment;
pub mod fs;
pub mod launcher;
mod logging;
pub mod pipeline;
pub mod template;

#[cfg(test)]
mod test_support;

use cli::Cli;
use config::Config;
use error::Result;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let base = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let config = base.apply_overrides(cli.overrides());

    let report = pipeline::run(&config)?;
    tracing::info!(
        variables = report.variables,
        output = %report.output.display(),
        launched = report.launch.is_some(),
        "done"
    );

    Ok(())
}
