//! Shared components for CLI commands
//!
//! This module contains the run summary, logging setup and configuration
//! loading used by every command.

use crate::app::services::measurement_service::Outcome;
use crate::cli::args::Args;
use crate::config::Config;
use crate::constants::LOG_TARGET;
use crate::{Error, Result};
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of commands parsed from the script
    pub commands_parsed: usize,
    /// Number of commands executed against the store
    pub commands_executed: usize,
    /// Number of lines that could not be parsed
    pub parse_errors: usize,
    /// Executed commands grouped by outcome
    pub outcomes: BTreeMap<u16, usize>,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

impl RunSummary {
    /// Count one executed command
    pub fn record(&mut self, outcome: Outcome) {
        self.commands_executed += 1;
        *self.outcomes.entry(outcome.status_code()).or_insert(0) += 1;
    }

    /// Number of executed commands that were rejected or found nothing
    pub fn rejected(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(code, _)| **code >= 400)
            .map(|(_, count)| count)
            .sum()
    }

    /// Number of executed commands that succeeded
    pub fn succeeded(&self) -> usize {
        self.commands_executed - self.rejected()
    }

    /// Print a summary to stderr
    pub fn print(&self, title: &str, colored_output: bool) {
        colored::control::set_override(colored_output);

        eprintln!("\n{}", title.bright_green().bold());
        eprintln!(
            "  Commands executed: {}",
            self.commands_executed.to_string().bright_white().bold()
        );
        eprintln!(
            "  Succeeded:         {}",
            self.succeeded().to_string().bright_white().bold()
        );
        if self.rejected() > 0 {
            eprintln!(
                "  Rejected:          {}",
                self.rejected().to_string().bright_yellow().bold()
            );
        }
        if self.parse_errors > 0 {
            eprintln!(
                "  Parse errors:      {}",
                self.parse_errors.to_string().bright_red().bold()
            );
        }
        for (code, count) in &self.outcomes {
            eprintln!("    {}: {}", code, count);
        }
        eprintln!("  Time:              {:.2?}", self.processing_time);

        colored::control::unset_override();
    }
}

/// Set up structured logging from the resolved configuration
pub fn setup_logging(config: &Config) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = config.logging.level.to_lowercase();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    let result = if config.logging.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration with the layered approach and apply CLI overrides
pub fn load_configuration(args: &Args) -> Result<Config> {
    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file: Option<&Path> = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_deref()
            .filter(|path| path.exists()),
    };

    let mut config = Config::load_layered(config_file)?;

    // Apply CLI argument overrides
    if let Some(level) = args.get_log_level() {
        config.logging.level = level.to_string();
    }
    if args.quiet {
        config.logging.quiet = true;
    }

    config.validate()?;

    if let Some(path) = config_file {
        info!("Using config file: {}", path.display());
    }

    Ok(config)
}
