//! # anatomy CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use anatomy_cli::check::{run_check, CheckArgs};
use anatomy_cli::relations::run_relations;
use anatomy_cli::validate::{run_validate, ValidateArgs};

/// Anatomy bundle validator.
///
/// Checks the JSON knowledge bundle behind the 3D anatomy viewer: schema
/// conformance of every data file and referential integrity of the
/// anatomy index.
#[derive(Parser, Debug)]
#[command(name = "anatomy", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate bundled JSON files against a JSON schema.
    Validate(ValidateArgs),

    /// Lint anatomy_3d_index.json relations for missing or duplicate ids.
    Relations,

    /// Run schema validation and the relation lint together.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // stdout carries the report; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let work_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    tracing::debug!(work_dir = %work_dir.display(), "starting");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Relations => run_relations(&work_dir),
        Commands::Check(args) => run_check(&args, &work_dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
