//! # dsv-cli: Schema Validation Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate`: check a document file against a schema file, optionally
//!   at a sub-path
//! - `hash`: print the content hash of a schema file
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; validation semantics live in `dsv-schema`.
//! - Exit codes: 0 success, 1 document rejected, 2 operational error.

pub mod hash;
pub mod input;
pub mod validate;
