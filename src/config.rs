//! Configuration management and validation.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `WEATHER_TRACKER__*` environment variables. Command-line overrides are
//! applied on top by the CLI.

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, DEFAULT_LOG_LEVEL, ENV_PREFIX, ENV_SEPARATOR, LOG_LEVELS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration for the weather tracker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Output rendering configuration
    pub output: OutputConfig,

    /// Script execution configuration
    pub script: ScriptConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level for the crate (error, warn, info, debug, trace)
    pub level: String,

    /// Minimal, compact log output
    pub quiet: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            quiet: false,
        }
    }
}

/// Output rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON responses instead of one line per response
    pub pretty: bool,

    /// Colour the summary written to stderr
    pub colored: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            colored: true,
        }
    }
}

/// Script execution configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Stop at the first line that cannot be parsed instead of reporting and continuing
    pub stop_on_error: bool,
}

impl Config {
    /// Default config file location (`<config dir>/weather-tracker/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Load configuration from defaults, an optional TOML file and the environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = config_file {
            debug!("Adding config file source: {}", path.display());
            builder = builder.add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Toml)
                    .required(true),
            );
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(Error::configuration(format!(
                "Invalid log level '{}': must be one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Override the log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Enable quiet logging
    pub fn with_quiet(mut self) -> Self {
        self.logging.quiet = true;
        self
    }

    /// Enable pretty JSON output
    pub fn with_pretty_output(mut self) -> Self {
        self.output.pretty = true;
        self
    }

    /// Stop scripts at the first parse error
    pub fn with_stop_on_error(mut self) -> Self {
        self.script.stop_on_error = true;
        self
    }
}
