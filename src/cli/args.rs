//! Command-line argument definitions for the weather tracker
//!
//! This module defines the CLI interface using the clap derive API.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the weather tracker
///
/// Executes measurement scripts against an in-memory measurement store and
/// prints one JSON response per command.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "weather-tracker",
    version,
    about = "Track weather measurements and compute min/max/average statistics",
    long_about = "Executes line-oriented measurement scripts (add, get, put, patch, delete, stats) \
                  against an in-memory weather measurement store. Lookups accept a full instant or \
                  a timestamp prefix such as a bare date; statistics cover an inclusive time window."
)]
pub struct Args {
    /// Path to configuration file
    ///
    /// Defaults to <config dir>/weather-tracker/config.toml when that file exists.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file"
    )]
    pub config_file: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors, in compact form
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Execute a measurement script and print one JSON response per command
    Run(RunArgs),
    /// Parse a measurement script and report errors without executing it
    Validate(ValidateArgs),
}

/// Arguments for the run command
#[derive(Debug, Clone, Parser)]
pub struct RunArgs {
    /// Script to execute; reads standard input when omitted or `-`
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Pretty-print JSON responses
    #[arg(long = "pretty")]
    pub pretty: bool,

    /// Stop at the first line that cannot be parsed
    #[arg(long = "stop-on-error")]
    pub stop_on_error: bool,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Script to check
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,
}

impl Args {
    /// Log level implied by the command line, if any
    pub fn get_log_level(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else {
            match self.verbose {
                0 => None,
                1 => Some("info"),
                2 => Some("debug"),
                _ => Some("trace"),
            }
        }
    }
}

impl RunArgs {
    /// Script path, or `None` to read standard input
    pub fn script_path(&self) -> Option<&std::path::Path> {
        self.script
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }
}
