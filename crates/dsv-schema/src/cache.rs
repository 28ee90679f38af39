//! # Validator Cache
//!
//! Maps `(schema hash, sub-path)` to a compiled validator. Schemas with equal
//! hashes share validators even when they are distinct instances.
//!
//! ## Concurrency
//!
//! The two-level map sits behind a `parking_lot::RwLock` that is only held
//! long enough to find or insert a slot. Each `(hash, path)` slot has its own
//! `Mutex`, held across compilation, so concurrent requests
//! for one key compile once and share the result while different keys
//! compile in parallel. Compiled handles are published through a `OnceLock`,
//! so lookups never wait on a compilation in progress.
//!
//! Paths are keyed in normalized form, so `address.zip` and `/address/zip`
//! share an entry. A path is resolved before its slot is created: requests
//! for paths that do not resolve leave nothing behind.
//!
//! Entries live for the lifetime of the cache. There is no eviction and no
//! invalidation: a hash always denotes the same definition.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use dsv_core::SchemaHash;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use serde_json::Value;

use crate::engine::{CompiledValidator, JsonSchemaEngine, NativeViolation, ValidationEngine};
use crate::error::SchemaError;
use crate::schema::{normalize_path, SchemaSource};

/// One `(hash, path)` entry. Empty until the first successful compile.
#[derive(Default)]
struct Slot {
    compiled: OnceLock<ValidatorHandle>,
    compiling: Mutex<()>,
}

/// Shared handle to a compiled validator.
pub type ValidatorHandle = Arc<CachedValidator>;

/// A compiled validator and the key it was compiled for.
pub struct CachedValidator {
    hash: SchemaHash,
    path: String,
    validator: Box<dyn CompiledValidator>,
}

impl std::fmt::Debug for CachedValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedValidator")
            .field("hash", &self.hash)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl CachedValidator {
    /// Hash of the schema this validator was compiled from.
    pub fn hash(&self) -> &SchemaHash {
        &self.hash
    }

    /// Sub-path this validator was compiled for.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Check a document, returning engine-native violations.
    pub fn check(&self, document: &Value) -> Vec<NativeViolation> {
        self.validator.check(document)
    }
}

/// Point-in-time cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Distinct schema hashes with at least one compiled validator.
    pub schemas: usize,
    /// Compiled `(hash, path)` entries.
    pub entries: usize,
    /// Total compilations performed.
    pub compilations: u64,
}

/// Process-wide store of compiled validators.
pub struct ValidatorCache {
    engine: Box<dyn ValidationEngine>,
    entries: RwLock<HashMap<SchemaHash, HashMap<String, Arc<Slot>>>>,
    compilations: AtomicU64,
}

impl std::fmt::Debug for ValidatorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorCache")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl Default for ValidatorCache {
    fn default() -> Self {
        Self::new(JsonSchemaEngine::default())
    }
}

impl ValidatorCache {
    /// Empty cache compiling with `engine`.
    pub fn new(engine: impl ValidationEngine + 'static) -> Self {
        Self {
            engine: Box::new(engine),
            entries: RwLock::new(HashMap::new()),
            compilations: AtomicU64::new(0),
        }
    }

    /// Return the validator for `(schema.hash(), path)`, compiling it on first use.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::SchemaPathNotFound`] if `path` does not resolve.
    ///   No slot is created.
    /// - [`SchemaError::ValidatorBuild`] if the engine rejects the definition.
    ///   The slot stays empty and the next request compiles again.
    pub fn get_or_create(
        &self,
        schema: &dyn SchemaSource,
        path: &str,
    ) -> Result<ValidatorHandle, SchemaError> {
        let hash = schema.hash();
        let not_found = || SchemaError::SchemaPathNotFound {
            path: path.to_string(),
        };
        let key = normalize_path(path).ok_or_else(not_found)?;

        if let Some(handle) = self.lookup(hash, &key) {
            tracing::trace!(%hash, path = %key, "validator cache hit");
            return Ok(handle);
        }

        let definition = schema.resolve_sub_schema(&key).ok_or_else(not_found)?;

        let slot = self.slot(hash, &key);
        let _compiling = slot.compiling.lock();
        if let Some(handle) = slot.compiled.get() {
            // Another caller compiled it while we waited on the slot.
            return Ok(Arc::clone(handle));
        }

        tracing::debug!(%hash, path = %key, "validator cache miss");

        let started = Instant::now();
        let validator =
            self.engine
                .compile(&definition)
                .map_err(|e| SchemaError::ValidatorBuild {
                    hash: hash.clone(),
                    path: path.to_string(),
                    reason: e.to_string(),
                })?;

        let elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.compilations.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("dsv_validator_compilations_total").increment(1);
        tracing::info!(%hash, path = %key, elapsed_us, "compiled validator");

        let handle = Arc::new(CachedValidator {
            hash: hash.clone(),
            path: key,
            validator,
        });
        // Only the holder of `compiling` sets the cell, so this cannot fail.
        let _ = slot.compiled.set(Arc::clone(&handle));
        Ok(handle)
    }

    /// Whether a compiled validator exists for `(hash, path)`.
    pub fn contains(&self, hash: &SchemaHash, path: &str) -> bool {
        normalize_path(path).is_some_and(|key| self.lookup(hash, &key).is_some())
    }

    /// Number of `(hash, path)` slots, compiled or still compiling.
    #[cfg(test)]
    fn slots(&self) -> usize {
        self.entries.read().values().map(HashMap::len).sum()
    }

    /// Number of compiled entries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .values()
            .flat_map(HashMap::values)
            .filter(|slot| slot.compiled.get().is_some())
            .count()
    }

    /// Returns true if nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total compilations performed over the cache's lifetime.
    pub fn compilations(&self) -> u64 {
        self.compilations.load(Ordering::Relaxed)
    }

    /// Snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read();
        let mut schemas = 0;
        let mut compiled = 0;
        for paths in entries.values() {
            let filled = paths
                .values()
                .filter(|slot| slot.compiled.get().is_some())
                .count();
            if filled > 0 {
                schemas += 1;
                compiled += filled;
            }
        }
        CacheStats {
            schemas,
            entries: compiled,
            compilations: self.compilations(),
        }
    }

    /// Fast path: a compiled handle under the shared lock.
    fn lookup(&self, hash: &SchemaHash, path: &str) -> Option<ValidatorHandle> {
        let entries = self.entries.read();
        entries.get(hash)?.get(path)?.compiled.get().map(Arc::clone)
    }

    fn slot(&self, hash: &SchemaHash, path: &str) -> Arc<Slot> {
        let mut entries = self.entries.write();
        let paths = entries.entry(hash.clone()).or_default();
        Arc::clone(paths.entry(path.to_string()).or_default())
    }
}
