mod check;
mod config;
mod output;
mod preprocess;
mod solve;

use config::SetcoverConfig;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "setcover")]
#[command(about = "Approximate minimum set cover over 0/1 incidence matrices")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: setcover.toml, searched upward from the working directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Preprocess an instance and select a cover greedily
    Solve(solve::SolveArgs),

    /// Apply the reduction rules and report what they removed
    Preprocess(preprocess::PreprocessArgs),

    /// Verify that a selection of variables covers an instance
    Check(check::CheckArgs),
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // RUST_LOG takes precedence over -v
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run() -> Result<u8> {
    let args = Args::parse();
    init_logger(args.verbose);

    match args.command {
        Commands::Solve(solve_args) => {
            let config = SetcoverConfig::resolve(args.config.as_ref())?;
            solve::execute(solve_args, &config)
        }
        Commands::Preprocess(preprocess_args) => {
            let config = SetcoverConfig::resolve(args.config.as_ref())?;
            preprocess::execute(preprocess_args, &config)
        }
        Commands::Check(check_args) => check::execute(check_args),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            // Print the error chain for debugging
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}
