//! # Hash Subcommand
//!
//! Prints the content hash a schema file is cached under.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use dsv_core::SchemaHash;

use crate::input::load_value;

/// Arguments for `dsv hash`.
#[derive(Args, Debug)]
pub struct HashArgs {
    /// Schema file (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,
}

/// Compute the schema hash.
pub fn schema_hash(args: &HashArgs) -> Result<SchemaHash> {
    let definition = load_value(&args.schema)?;
    SchemaHash::of(&definition).context("cannot hash schema")
}

/// Execute `dsv hash`, printing the hash. Returns the exit code.
pub fn run_hash(args: &HashArgs) -> Result<u8> {
    println!("{}", schema_hash(args)?);
    Ok(0)
}
