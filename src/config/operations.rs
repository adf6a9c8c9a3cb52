//! Config loading, validation, and override layering.

use super::model::{Config, ConfigOverrides};
use crate::error::{EnvJobError, Result};
use crate::fragment::MAX_INDENT;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(EnvJobError::Config)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            EnvJobError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    ///
    /// An empty, comment-only, or null (`~`) document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str::<Option<Config>>(yaml)
                .map_err(|e| EnvJobError::Config(format!("failed to parse config YAML: {}", e)))?
                .unwrap_or_default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to a YAML string.
    #[cfg(test)]
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| EnvJobError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Layer command-line values over this config.
    ///
    /// Boolean flags can only switch a setting on.
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(env_file) = overrides.env_file {
            self.env_file = env_file;
        }
        if let Some(template) = overrides.template {
            self.template = template;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(placeholder) = overrides.placeholder {
            self.placeholder = placeholder;
        }
        if let Some(indent) = overrides.indent {
            self.indent = indent;
        }
        if let Some(scheduler_command) = overrides.scheduler_command {
            self.scheduler_command = scheduler_command;
        }
        self.skip_launch |= overrides.skip_launch;
        self.strict |= overrides.strict;
        self
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `env_file`, `template` and `output` must be non-empty
    /// - `placeholder` must be non-empty
    /// - `indent` must not exceed `MAX_INDENT`
    /// - `scheduler_command` must contain something other than whitespace
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("env_file", &self.env_file),
            ("template", &self.template),
            ("output", &self.output),
        ] {
            if path.as_os_str().is_empty() {
                return Err(EnvJobError::Config(format!("{} must not be empty", name)));
            }
        }

        if self.placeholder.is_empty() {
            return Err(EnvJobError::Config(
                "placeholder must not be empty".to_string(),
            ));
        }

        if self.indent > MAX_INDENT {
            return Err(EnvJobError::Config(format!(
                "indent too large: {} (maximum is {})",
                self.indent, MAX_INDENT
            )));
        }

        if self.scheduler_command.trim().is_empty() {
            return Err(EnvJobError::Config(
                "scheduler_command must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
