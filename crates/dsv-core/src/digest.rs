//! # Schema Content Digest
//!
//! `SchemaHash` identifies a schema by content, not by object identity.
//! Two schema instances built from structurally identical definitions share
//! a hash, and therefore share every compiled validator in the cache.
//!
//! Digests computed here are lowercase hex SHA-256 over
//! [`CanonicalBytes`]. A host that already has its own schema digest can
//! adopt it with [`SchemaHash::from_raw`]; the cache treats the hash as an
//! opaque string either way.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::CanonicalizationError;

/// Content hash of a schema definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaHash(String);

impl SchemaHash {
    /// Compute the SHA-256 content hash of a schema definition.
    ///
    /// # Errors
    ///
    /// Propagates canonicalization failures.
    pub fn of(definition: &Value) -> Result<Self, CanonicalizationError> {
        let cb = CanonicalBytes::new(definition)?;
        Ok(Self(sha256_hex(&cb)))
    }

    /// Adopt a digest computed elsewhere.
    pub fn from_raw(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// The hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SchemaHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SchemaHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Compute a lowercase SHA-256 hex string from canonical bytes.
///
/// Accepts only `&CanonicalBytes`, so every hash in the system is taken
/// over the canonical form.
pub fn sha256_hex(data: &CanonicalBytes) -> String {
    let hash = Sha256::digest(data.as_bytes());
    hash.iter().map(|b| format!("{b:02x}")).collect()
}
