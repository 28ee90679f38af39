//! # Document Validation
//!
//! `validate` on a [`Schema`]: fetch (or compile) the validator for the
//! requested sub-path from the shared cache, run it, and either hand the
//! document back unchanged or fail with a [`DocumentValidationFailure`].
//!
//! Engine-native violations are narrowed to [`ValidationErrorRecord`]s so
//! callers never depend on engine-specific fields.

use serde_json::Value;

use crate::engine::NativeViolation;
use crate::error::{DocumentValidationFailure, SchemaError, ValidationErrorRecord};
use crate::schema::Schema;

impl Schema {
    /// Validate `document` against the sub-schema at `path` (`""` for the root).
    ///
    /// Returns the same document on success, so calls chain:
    /// `schema.validate(schema.validate(doc, "")?, "")?`.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::SchemaPathNotFound`] if `path` does not resolve,
    ///   whatever the document holds.
    /// - [`SchemaError::DocumentValidationFailed`] with one record per violation.
    /// - [`SchemaError::ValidatorBuild`] if the schema itself does not compile.
    pub fn validate(&self, document: Value, path: &str) -> Result<Value, SchemaError> {
        let violations = self.violations(&document, path)?;
        if violations.is_empty() {
            return Ok(document);
        }

        let errors = normalize(violations);
        tracing::debug!(
            hash = %self.hash(),
            path,
            errors = errors.len(),
            "document rejected"
        );

        Err(SchemaError::DocumentValidationFailed(Box::new(
            DocumentValidationFailure {
                errors,
                path: path.to_string(),
                document,
                schema: self.definition().clone(),
            },
        )))
    }

    /// Validate against the root schema.
    pub fn validate_root(&self, document: Value) -> Result<Value, SchemaError> {
        self.validate(document, "")
    }

    /// Check `document` without taking ownership.
    ///
    /// # Errors
    ///
    /// Only path resolution and compilation failures are errors; a
    /// non-conforming document is `Ok(false)`.
    pub fn is_valid(&self, document: &Value, path: &str) -> Result<bool, SchemaError> {
        Ok(self.violations(document, path)?.is_empty())
    }

    fn violations(&self, document: &Value, path: &str) -> Result<Vec<NativeViolation>, SchemaError> {
        let validator = self.cache().get_or_create(self, path)?;
        Ok(validator.check(document))
    }
}

/// Keep only the engine-agnostic fields of each violation.
fn normalize(violations: Vec<NativeViolation>) -> Vec<ValidationErrorRecord> {
    violations
        .into_iter()
        .map(|v| ValidationErrorRecord {
            title: v.title,
            description: v.description,
            message: v.message,
            instance_path: v.instance_path,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_engine_fields() {
        let records = normalize(vec![NativeViolation {
            title: Some("Age".to_string()),
            description: Some("years".to_string()),
            message: "\"x\" is not of type \"number\"".to_string(),
            instance_path: "/age".to_string(),
            schema_path: "/properties/age/type".to_string(),
            keyword: "type".to_string(),
        }]);
        assert_eq!(
            records,
            vec![ValidationErrorRecord {
                title: Some("Age".to_string()),
                description: Some("years".to_string()),
                message: "\"x\" is not of type \"number\"".to_string(),
                instance_path: "/age".to_string(),
            }]
        );
    }
}
