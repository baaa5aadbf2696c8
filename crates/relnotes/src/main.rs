mod cli;
mod fetch;

use clap::Parser;
use cli::{Cli, Commands};
use fetch::FetchOutcome;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Fetch(args) => match fetch::run(&args) {
            Ok(FetchOutcome::Printed) => ExitCode::SUCCESS,
            Ok(FetchOutcome::NotFound) => ExitCode::from(2),
            Err(e) => {
                eprintln!("Failed to fetch changelog: {e}");
                ExitCode::from(1)
            }
        },
    }
}

/// Logs go to stderr so stdout carries only the changelog.
/// `RELNOTES_LOG` (then `RUST_LOG`) wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,relnotes=debug,relnotes_core=debug",
        _ => "warn,relnotes=trace,relnotes_core=trace",
    };
    let filter = EnvFilter::try_from_env("RELNOTES_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| default.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
