//! End-to-end run: load env file, render fragment, inject, write, launch.
//!
//! Each stage runs once, in order, and any hard failure aborts the run. The
//! two soft hazards (template without the placeholder, unsuccessful scheduler
//! run) are only logged unless the config is strict.

use crate::config::Config;
use crate::env;
use crate::error::{EnvJobError, Result};
use crate::fragment::format_fragment_with_indent;
use crate::launcher::{self, LaunchOutcome};
use crate::template;
use std::path::PathBuf;

#[cfg(test)]
mod tests;

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Number of variables loaded from the env file.
    pub variables: usize,
    /// Number of placeholder occurrences replaced in the template.
    pub replacements: usize,
    /// Where the generated job specification was written.
    pub output: PathBuf,
    /// Scheduler result, or `None` if launching was skipped or failed to start.
    pub launch: Option<LaunchOutcome>,
}

/// Execute the full pipeline for `config`.
pub fn run(config: &Config) -> Result<RunReport> {
    config.validate()?;

    let vars = env::load(&config.env_file)?;
    let fragment = format_fragment_with_indent(&vars, config.indent);

    let template_text = template::load_template(&config.template)?;
    let injection = template::inject(&template_text, &config.placeholder, &fragment);
    tracing::debug!(replacements = injection.replacements, "injected env fragment");

    // The file is written even when the placeholder is missing, so strict and
    // lenient runs leave the same output behind.
    template::write_output(&config.output, &injection.content)?;

    if !injection.found_placeholder() {
        if config.strict {
            return Err(EnvJobError::PlaceholderMissing {
                placeholder: config.placeholder.clone(),
                template: config.template.display().to_string(),
            });
        }
        tracing::warn!(
            placeholder = %config.placeholder,
            template = %config.template.display(),
            "placeholder not found; job file is an unchanged copy of the template"
        );
    }

    let launch = if config.skip_launch {
        tracing::info!("skipping scheduler launch");
        None
    } else {
        submit(config)?
    };

    Ok(RunReport {
        variables: vars.len(),
        replacements: injection.replacements,
        output: config.output.clone(),
        launch,
    })
}

/// Run the scheduler on the generated file and apply the strictness policy.
fn submit(config: &Config) -> Result<Option<LaunchOutcome>> {
    let command = launcher::build_command(&config.scheduler_command, &config.output);

    let outcome = match launcher::launch(&command) {
        Ok(outcome) => outcome,
        Err(err) if !config.strict => {
            tracing::warn!(error = %err, "scheduler could not be started");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    if !outcome.is_success() {
        if config.strict {
            return Err(EnvJobError::SchedulerFailed {
                command: outcome.command.clone(),
                status: outcome.describe_status(),
            });
        }
        tracing::warn!(
            command = %outcome.command,
            status = %outcome.describe_status(),
            "scheduler command did not succeed"
        );
    }

    Ok(Some(outcome))
}
