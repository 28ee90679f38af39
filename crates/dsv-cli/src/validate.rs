//! # Validate Subcommand
//!
//! Checks one document file against a schema file, or against the
//! sub-schema at `--path`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use dsv_schema::{SchemaError, SchemaHash, ValidationContext, ValidationErrorRecord};

use crate::input::load_value;

/// Arguments for `dsv validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,

    /// Document file (JSON or YAML).
    #[arg(long)]
    pub document: PathBuf,

    /// Sub-schema path, e.g. `address.zip`. Empty validates against the root.
    #[arg(long, default_value = "")]
    pub path: String,

    /// Use this schema hash instead of computing one from the content.
    #[arg(long)]
    pub hash: Option<String>,
}

/// Result of validating one document.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The document conforms.
    Valid,
    /// The document violates the schema.
    Rejected(Vec<ValidationErrorRecord>),
    /// `--path` does not address a schema node.
    PathNotFound(String),
}

/// Validate without printing.
///
/// Operational failures (unreadable files, uncompilable schema) are `Err`.
pub fn check(args: &ValidateArgs, ctx: &ValidationContext) -> Result<Outcome> {
    let definition = load_value(&args.schema).context("failed to load schema")?;
    let document = load_value(&args.document).context("failed to load document")?;

    let schema = match &args.hash {
        Some(hash) => ctx.create_schema_with_hash(SchemaHash::from_raw(hash.clone()), definition),
        None => ctx.create_schema(definition)?,
    };
    tracing::info!(hash = %schema.hash(), path = %args.path, "validating document");

    match schema.validate(document, &args.path) {
        Ok(_) => Ok(Outcome::Valid),
        Err(SchemaError::SchemaPathNotFound { path }) => Ok(Outcome::PathNotFound(path)),
        Err(SchemaError::DocumentValidationFailed(failure)) => Ok(Outcome::Rejected(failure.errors)),
        Err(other) => Err(other.into()),
    }
}

/// Execute `dsv validate`. Returns the exit code.
pub fn run_validate(args: &ValidateArgs, ctx: &ValidationContext) -> Result<u8> {
    match check(args, ctx)? {
        Outcome::Valid => {
            println!("OK: {}", args.document.display());
            Ok(0)
        }
        Outcome::PathNotFound(path) => {
            println!("FAIL: no schema node at path '{path}'");
            Ok(1)
        }
        Outcome::Rejected(errors) => {
            println!(
                "FAIL: {} ({} violation(s))",
                args.document.display(),
                errors.len()
            );
            for record in &errors {
                match &record.title {
                    Some(title) => println!("  {record} [{title}]"),
                    None => println!("  {record}"),
                }
            }
            Ok(1)
        }
    }
}
