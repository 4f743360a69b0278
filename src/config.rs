//! Configuration types for the install wizard

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Rendering and timing knobs for the wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Number of output lines kept in the progress log tail
    pub max_log_lines: usize,

    /// Width (in columns) log lines are truncated to
    pub render_width: usize,

    /// Width of the overall progress bar
    pub bar_width: usize,

    /// Spinner animation interval in milliseconds
    pub spinner_interval_ms: u64,

    /// Delay between simulated install steps in milliseconds
    pub step_delay_ms: u64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            max_log_lines: 8,
            render_width: 80,
            bar_width: 40,
            spinner_interval_ms: 100,
            step_delay_ms: 600,
        }
    }
}

impl WizardConfig {
    /// Spinner animation interval
    pub fn spinner_interval(&self) -> Duration {
        Duration::from_millis(self.spinner_interval_ms)
    }

    /// Delay between simulated install steps
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Reject values the widgets cannot render with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("max_log_lines", self.max_log_lines as u64),
            ("render_width", self.render_width as u64),
            ("bar_width", self.bar_width as u64),
            ("spinner_interval_ms", self.spinner_interval_ms),
            ("step_delay_ms", self.step_delay_ms),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    message: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: WizardConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when one is given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => Ok(Self::load_from_file(path)?),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError { source: e })?;

        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# Install Wizard Configuration File
# This file uses TOML format (https://toml.io)

# Number of installer output lines kept on the progress screen
max_log_lines = 8

# Output lines wider than this are cut off with "..."
render_width = 80

# Width of the overall progress bar in columns
bar_width = 40

# Spinner animation interval in milliseconds
spinner_interval_ms = 100

# Pace of the simulated install, in milliseconds per step
step_delay_ms = 600
"#
        .to_string()
    }
}

/// Errors that can occur when loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to write config file '{}': {source}", .path.display())]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {source}")]
    SerializeError { source: toml::ser::Error },

    #[error("Invalid value for '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}
