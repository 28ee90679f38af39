//! # dsv-schema: Document Schema Validation
//!
//! Validates documents (or sub-documents addressed by a path into the
//! schema) against JSON Schema definitions for a document store.
//!
//! ## Validator lifecycle
//!
//! Compiling a validator is the expensive step, so compiled validators live
//! in a [`ValidatorCache`] keyed by `(schema content hash, sub-path)`:
//!
//! - Structurally identical schemas share validators, even as separate
//!   instances, because the key is the content hash.
//! - Each sub-path is compiled on its own the first time it is validated
//!   against.
//! - Creating a schema schedules its root validator to compile at idle time
//!   ([`warmup`]), so the first `validate` rarely pays for compilation.
//!
//! ## Usage
//!
//! ```rust
//! use dsv_schema::{ValidationConfig, ValidationContext};
//! use serde_json::json;
//!
//! let ctx = ValidationContext::new(ValidationConfig::default());
//! let schema = ctx
//!     .create_schema(json!({
//!         "type": "object",
//!         "properties": {"age": {"type": "number"}},
//!         "required": ["age"]
//!     }))
//!     .unwrap();
//!
//! let doc = schema.validate(json!({"age": 42}), "").unwrap();
//! assert_eq!(doc, json!({"age": 42}));
//! assert!(schema.validate(json!({}), "").is_err());
//! assert!(schema.validate(json!(42), "age").is_ok());
//! ```
//!
//! ## Crate Policy
//!
//! - The constraint-checking algorithm stays behind [`ValidationEngine`];
//!   public errors never expose engine types.
//! - Cache entries are never evicted or replaced.

pub mod cache;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod schema;
mod validate;
pub mod warmup;

pub use cache::{CacheStats, CachedValidator, ValidatorCache, ValidatorHandle};
pub use config::{SchemaDraft, ValidationConfig, WarmupMode};
pub use context::ValidationContext;
pub use engine::{CompiledValidator, JsonSchemaEngine, NativeViolation, ValidationEngine};
pub use error::{
    ConfigError, DocumentValidationFailure, EngineError, SchemaError, ValidationErrorRecord,
};
pub use schema::{normalize_path, resolve_path, Schema, SchemaSource};
pub use warmup::{
    default_scheduler, on_schema_created, DisabledScheduler, IdleScheduler, IdleTask,
    ImmediateScheduler, TokioIdleScheduler,
};

pub use dsv_core::SchemaHash;
