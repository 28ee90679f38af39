//! # Schema Object
//!
//! A [`Schema`] is an immutable schema definition plus its content hash and
//! the validator cache it validates through. Instances are created by a
//! [`ValidationContext`](crate::context::ValidationContext) and are cheap to
//! clone.
//!
//! ## Sub-schema paths
//!
//! A path addresses a nested definition by property names, separated by `.`
//! or `/`: `address.zip` and `/address/zip` both select
//! `properties.address.properties.zip`. Array item schemas are reached with
//! `[]` (or an index for tuple schemas): `tags.[]`, `point.0`.
//! The empty path is the root. Spellings of one path share a cache entry:
//! the cache keys on [`normalize_path`].

use std::sync::Arc;

use dsv_core::SchemaHash;
use serde_json::Value;

use crate::cache::ValidatorCache;

/// What the [`ValidatorCache`] needs from a schema.
pub trait SchemaSource {
    /// Content hash; equal hashes mean interchangeable definitions.
    fn hash(&self) -> &SchemaHash;

    /// The full schema definition.
    fn root_definition(&self) -> &Value;

    /// The definition reachable at `path`, or `None` if `path` does not
    /// address a schema node.
    fn resolve_sub_schema(&self, path: &str) -> Option<Value> {
        resolve_path(self.root_definition(), path)
    }
}

/// An immutable schema bound to a validator cache.
#[derive(Clone)]
pub struct Schema {
    inner: Arc<SchemaInner>,
}

struct SchemaInner {
    hash: SchemaHash,
    definition: Value,
    cache: Arc<ValidatorCache>,
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("hash", &self.inner.hash)
            .field("definition", &self.inner.definition)
            .finish_non_exhaustive()
    }
}

impl Schema {
    pub(crate) fn new(hash: SchemaHash, definition: Value, cache: Arc<ValidatorCache>) -> Self {
        Self {
            inner: Arc::new(SchemaInner {
                hash,
                definition,
                cache,
            }),
        }
    }

    /// Content hash of this schema.
    pub fn hash(&self) -> &SchemaHash {
        &self.inner.hash
    }

    /// Root definition.
    pub fn definition(&self) -> &Value {
        &self.inner.definition
    }

    /// The cache this schema validates through.
    pub fn cache(&self) -> &Arc<ValidatorCache> {
        &self.inner.cache
    }

    /// Resolve a sub-schema path against this schema.
    pub fn sub_schema(&self, path: &str) -> Option<Value> {
        resolve_path(&self.inner.definition, path)
    }
}

impl SchemaSource for Schema {
    fn hash(&self) -> &SchemaHash {
        &self.inner.hash
    }

    fn root_definition(&self) -> &Value {
        &self.inner.definition
    }
}

/// Resolve `path` within `root`.
///
/// Returns a standalone copy of the addressed node. If the root carries
/// `$defs` or `definitions` and the node does not, they are copied in so
/// local `#/$defs/...` references keep resolving once the node is compiled
/// on its own.
pub fn resolve_path(root: &Value, path: &str) -> Option<Value> {
    let segments = split_path(path)?;
    if segments.is_empty() {
        return Some(root.clone());
    }

    let mut node = root;
    for segment in segments {
        node = step(node, segment)?;
    }

    if !(node.is_object() || node.is_boolean()) {
        return None;
    }

    let mut resolved = node.clone();
    carry_definitions(root, &mut resolved);
    Some(resolved)
}

/// Canonical spelling of `path`: segments joined by `.`, no leading
/// separator. `""`, `"/"` and `"a/b"` become `""`, `""` and `"a.b"`.
/// `None` if the path contains an empty segment.
pub fn normalize_path(path: &str) -> Option<String> {
    split_path(path).map(|segments| segments.join("."))
}

/// Split a path into segments. `None` if it contains an empty segment.
fn split_path(path: &str) -> Option<Vec<&str>> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return Some(Vec::new());
    }
    let segments: Vec<&str> = trimmed.split(['.', '/']).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    Some(segments)
}

fn step<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    if let Some(child) = node.get("properties").and_then(|p| p.get(segment)) {
        return Some(child);
    }

    if segment == "[]" {
        return node.get("items").filter(|items| !items.is_array());
    }

    let index: usize = segment.parse().ok()?;
    if let Some(prefix) = node.get("prefixItems").and_then(Value::as_array) {
        // Past the prefix, positions fall to the trailing `items` schema.
        return prefix
            .get(index)
            .or_else(|| node.get("items").filter(|items| !items.is_array()));
    }
    match node.get("items")? {
        Value::Array(tuple) => tuple.get(index),
        single => Some(single),
    }
}

fn carry_definitions(root: &Value, resolved: &mut Value) {
    let Some(target) = resolved.as_object_mut() else {
        return;
    };
    for key in ["$defs", "definitions"] {
        if target.contains_key(key) {
            continue;
        }
        if let Some(defs) = root.get(key) {
            target.insert(key.to_string(), defs.clone());
        }
    }
}
