use clap::{CommandFactory, Parser};
use std::process;
use weather_tracker::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(weather_tracker::Error::processing_interrupted(
                    "Interrupted by user",
                )
                .into())
            }
        }
    });

    match result {
        Ok(_summary) => {
            // Summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information when no subcommand is provided
fn show_help_and_commands() {
    println!("Weather Tracker - In-memory weather measurement store");
    println!("=====================================================");
    println!();
    if Args::command().print_help().is_err() {
        eprintln!("Failed to print help");
    }
    println!();
    println!("EXAMPLES:");
    println!("    # Execute a measurement script:");
    println!("    weather-tracker run scenario.txt");
    println!();
    println!("    # Read commands from stdin:");
    println!("    echo 'get 2015-09-01' | weather-tracker run");
    println!();
    println!("    # Check a script without executing it:");
    println!("    weather-tracker validate scenario.txt");
}
