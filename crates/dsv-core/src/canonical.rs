//! # Canonical Serialization: JCS Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! that feed a schema content hash.
//!
//! ## Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which serializes with
//! RFC 8785 (JSON Canonicalization Scheme) rules: sorted keys, compact
//! separators, deterministic number formatting.
//!
//! Schema definitions routinely carry fractional numbers (`multipleOf: 0.01`,
//! `minimum: 0.5`), so floats pass through unchanged. `serde_json::Value`
//! cannot hold NaN or infinities, so every value has a canonical form.

use serde::Serialize;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - Object keys are sorted, separators are compact.
/// - Output is valid UTF-8 JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if the value
    /// cannot be represented as JSON (e.g. a map with non-string keys).
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let s = serde_jcs::to_string(obj)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn canonical_str(value: &serde_json::Value) -> String {
        let cb = CanonicalBytes::new(value).expect("should canonicalize");
        String::from_utf8(cb.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn test_sorted_keys_compact_separators() {
        let data = json!({"type": "object", "required": ["age"], "properties": {}});
        assert_eq!(
            canonical_str(&data),
            r#"{"properties":{},"required":["age"],"type":"object"}"#
        );
    }

    #[test]
    fn test_nested_objects_sorted() {
        let data = json!({
            "properties": {"name": {"type": "string", "maxLength": 20}},
            "additionalProperties": false
        });
        assert_eq!(
            canonical_str(&data),
            r#"{"additionalProperties":false,"properties":{"name":{"maxLength":20,"type":"string"}}}"#
        );
    }

    #[test]
    fn test_array_order_preserved() {
        let data = json!({"enum": ["b", "a", "c"]});
        assert_eq!(canonical_str(&data), r#"{"enum":["b","a","c"]}"#);
    }

    #[test]
    fn test_fractional_numbers_accepted() {
        let data = json!({"type": "number", "multipleOf": 0.01});
        let s = canonical_str(&data);
        assert!(s.contains("0.01"), "got {s}");
    }

    #[test]
    fn test_boolean_schema() {
        assert_eq!(canonical_str(&json!(true)), "true");
    }

    #[test]
    fn test_empty_object() {
        let cb = CanonicalBytes::new(&json!({})).unwrap();
        assert_eq!(cb.as_bytes(), b"{}");
        assert!(!cb.is_empty());
        assert_eq!(cb.len(), 2);
    }

    #[test]
    fn test_unicode_passthrough() {
        let s = canonical_str(&json!({"title": "\u{00e9}t\u{00e9}"}));
        assert!(s.contains('\u{00e9}'));
    }
}
