use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use psd_sim::commands::{
    encode::{self, EncodeArgs},
    moments::{self, MomentsArgs},
    remap::{self, RemapArgs},
    summary::{self, SummaryArgs},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "psd-sim", about = "Particle-size distribution toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the summary line of every reconstructable string in a file.
    Summary(SummaryArgs),
    /// Compute moments for the distributions of a run configuration.
    Moments(MomentsArgs),
    /// Predict the instrument response for a run configuration.
    Remap(RemapArgs),
    /// Write the reconstructable string of every configured distribution.
    Encode(EncodeArgs),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result: Result<(), Box<dyn Error>> = match &cli.command {
        Command::Summary(args) => summary::run(args),
        Command::Moments(args) => moments::run(args),
        Command::Remap(args) => remap::run(args),
        Command::Encode(args) => encode::run(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
