//! # sceneval CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sceneval_cli::check::{run_check, CheckArgs};
use sceneval_cli::input::load_options;
use sceneval_cli::scenes::{run_scenes, ScenesArgs};
use sceneval_cli::EXIT_ERROR;

/// Scene-aware validation of structured documents.
///
/// Validates YAML or JSON documents against a record descriptor that
/// declares field rules, display aliases, scenes, and message overrides.
#[derive(Parser, Debug)]
#[command(name = "sceneval", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to a YAML file with validator options.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a document against a record descriptor.
    Check(CheckArgs),

    /// List the scenes a descriptor declares.
    Scenes(ScenesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Logs go to stderr so stdout carries only the report.
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::debug!("sceneval CLI starting");

    let mut stdout = std::io::stdout().lock();
    let result = load_options(cli.config.as_deref()).and_then(|options| match &cli.command {
        Commands::Check(args) => run_check(args, options, &mut stdout),
        Commands::Scenes(args) => run_scenes(args, &mut stdout),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
