//! Command implementations for the weather tracker CLI
//!
//! Each command is implemented in its own module.

pub mod run;
pub mod shared;
pub mod validate;

pub use shared::RunSummary;

use crate::cli::args::{Args, Commands};

/// Main command runner
///
/// Dispatches to the appropriate subcommand handler:
/// - `run`: execute a measurement script
/// - `validate`: parse a measurement script and report errors
pub async fn run(args: Args) -> anyhow::Result<RunSummary> {
    match &args.command {
        Some(Commands::Run(run_args)) => run::run_script(&args, run_args).await,
        Some(Commands::Validate(validate_args)) => {
            validate::run_validate(&args, validate_args).await
        }
        None => Ok(RunSummary::default()),
    }
}
