//! Validate command implementation for the weather tracker CLI
//!
//! Parses a measurement script without executing it and reports every line
//! that cannot be parsed.

use super::shared::{RunSummary, load_configuration, setup_logging};
use super::run::read_script;
use crate::Error;
use crate::cli::args::{Args, ValidateArgs};
use crate::cli::script::parse_script;
use anyhow::Result;
use colored::Colorize;
use std::time::Instant;
use tracing::{debug, error, info};

/// Validate command entry point
///
/// Returns an error when at least one line is invalid, so the process exits
/// with a non-zero status.
pub async fn run_validate(args: &Args, validate_args: &ValidateArgs) -> Result<RunSummary> {
    let start_time = Instant::now();

    let config = load_configuration(args)?;
    setup_logging(&config)?;
    debug!("Validation arguments: {:?}", validate_args);

    let script = read_script(Some(validate_args.script.as_path())).await?;
    let parsed = parse_script(&script);

    let summary = RunSummary {
        commands_parsed: parsed.commands.len(),
        parse_errors: parsed.errors.len(),
        processing_time: start_time.elapsed(),
        ..Default::default()
    };

    colored::control::set_override(config.output.colored);
    for e in &parsed.errors {
        error!("{}", e);
        eprintln!("{} {}", "invalid:".bright_red().bold(), e);
    }
    colored::control::unset_override();

    if !parsed.is_valid() {
        return Err(Error::invalid_input(format!(
            "{} of {} script lines are invalid",
            parsed.errors.len(),
            parsed.errors.len() + parsed.commands.len()
        ))
        .into());
    }

    info!(
        "Script {} is valid: {} commands",
        validate_args.script.display(),
        summary.commands_parsed
    );
    eprintln!(
        "{} {} commands",
        "valid:".bright_green().bold(),
        summary.commands_parsed
    );

    Ok(summary)
}
