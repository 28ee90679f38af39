//! # Validation Context
//!
//! Owns the validator cache and warm-up scheduler shared by every schema it
//! creates. Construct one at application start and pass it (or clones of it)
//! to whatever creates schemas; tests build a fresh one each.

use std::sync::Arc;

use dsv_core::SchemaHash;
use serde_json::Value;

use crate::cache::ValidatorCache;
use crate::config::{ValidationConfig, WarmupMode};
use crate::engine::JsonSchemaEngine;
use crate::error::SchemaError;
use crate::schema::Schema;
use crate::warmup::{
    default_scheduler, on_schema_created, DisabledScheduler, IdleScheduler, ImmediateScheduler,
};

/// Factory for [`Schema`]s sharing one [`ValidatorCache`].
#[derive(Clone)]
pub struct ValidationContext {
    cache: Arc<ValidatorCache>,
    scheduler: Arc<dyn IdleScheduler>,
}

impl std::fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

impl ValidationContext {
    /// Context with a fresh cache and the scheduler `config.warmup` selects.
    ///
    /// [`WarmupMode::Idle`] resolves to [`default_scheduler`], so it depends
    /// on whether a Tokio runtime is current at construction time.
    pub fn new(config: ValidationConfig) -> Self {
        let scheduler: Arc<dyn IdleScheduler> = match config.warmup {
            WarmupMode::Idle => default_scheduler(),
            WarmupMode::Immediate => Arc::new(ImmediateScheduler),
            WarmupMode::Disabled => Arc::new(DisabledScheduler),
        };
        let cache = Arc::new(ValidatorCache::new(JsonSchemaEngine::new(config.draft)));
        Self::with_parts(cache, scheduler)
    }

    /// Context over an existing cache and scheduler.
    pub fn with_parts(cache: Arc<ValidatorCache>, scheduler: Arc<dyn IdleScheduler>) -> Self {
        Self { cache, scheduler }
    }

    /// Create a schema identified by the content hash of `definition`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Canonicalization`] if the definition cannot be
    /// hashed.
    pub fn create_schema(&self, definition: Value) -> Result<Schema, SchemaError> {
        let hash = SchemaHash::of(&definition)?;
        Ok(self.create_schema_with_hash(hash, definition))
    }

    /// Create a schema with a caller-supplied hash.
    ///
    /// The caller guarantees that equal hashes denote equal definitions.
    pub fn create_schema_with_hash(&self, hash: SchemaHash, definition: Value) -> Schema {
        let schema = Schema::new(hash, definition, Arc::clone(&self.cache));
        tracing::debug!(hash = %schema.hash(), "schema created");
        on_schema_created(&schema, self.scheduler.as_ref());
        schema
    }

    /// The shared validator cache.
    pub fn cache(&self) -> &Arc<ValidatorCache> {
        &self.cache
    }
}
