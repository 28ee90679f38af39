//! # dsv CLI entry point
//!
//! Parses command-line arguments, builds the validation context from config,
//! and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dsv_cli::hash::{run_hash, HashArgs};
use dsv_cli::validate::{run_validate, ValidateArgs};
use dsv_schema::{ValidationConfig, ValidationContext};

/// Document schema validation.
///
/// Validates JSON/YAML documents against JSON Schema definitions, whole or at
/// a sub-path.
#[derive(Parser, Debug)]
#[command(name = "dsv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML/JSON configuration file. Defaults to DSV_* environment variables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a document against a schema or one of its sub-paths.
    Validate(ValidateArgs),

    /// Print the content hash of a schema.
    Hash(HashArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Validate(args) => {
            load_config(cli.config.as_ref()).and_then(|config| {
                tracing::debug!(?config, "loaded validation config");
                let ctx = ValidationContext::new(config);
                run_validate(&args, &ctx)
            })
        }
        Commands::Hash(args) => run_hash(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ValidationConfig> {
    match path {
        Some(path) => ValidationConfig::from_file(path).context("failed to load config file"),
        None => ValidationConfig::from_env().context("invalid DSV_* environment"),
    }
}
