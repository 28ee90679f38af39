//! # dsv-core: Foundational Types for Schema Validation
//!
//! Leaf crate of the workspace. Defines how a schema definition is turned
//! into a stable content hash, which is the identity every compiled
//! validator is cached under.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** All hashing flows through
//!    `CanonicalBytes::new()`, so two definitions that differ only in key
//!    order or whitespace always hash the same.
//!
//! 2. **`SchemaHash` is opaque.** The cache compares hashes as strings; it
//!    never re-derives them. Externally supplied digests are adopted as-is.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dsv-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_hex, SchemaHash};
pub use error::CanonicalizationError;
