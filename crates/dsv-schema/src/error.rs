//! # Error Types
//!
//! Both validation error kinds are terminal for the `validate` call that
//! raised them: there is no partial success and no retry, since validity is
//! a pure function of document and schema.

use std::fmt;

use dsv_core::{CanonicalizationError, SchemaHash};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors returned by schema creation and validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The requested sub-path does not address a schema node.
    #[error("no schema node at path '{path}'")]
    SchemaPathNotFound {
        /// The path that failed to resolve.
        path: String,
    },

    /// The document violates one or more constraints.
    #[error("{0}")]
    DocumentValidationFailed(Box<DocumentValidationFailure>),

    /// The validation engine could not compile the (sub-)schema.
    #[error("failed to compile validator for schema {hash} at path '{path}': {reason}")]
    ValidatorBuild {
        /// Hash of the schema being compiled.
        hash: SchemaHash,
        /// Sub-path being compiled.
        path: String,
        /// Engine-reported reason.
        reason: String,
    },

    /// The schema definition could not be hashed.
    #[error("schema hashing failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

impl SchemaError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SchemaPathNotFound { .. } => "schema_path_not_found",
            Self::DocumentValidationFailed(_) => "document_validation_failed",
            Self::ValidatorBuild { .. } => "validator_build_failed",
            Self::Canonicalization(_) => "schema_hash_failed",
        }
    }

    /// The validation failure, if this error is one.
    pub fn as_validation_failure(&self) -> Option<&DocumentValidationFailure> {
        match self {
            Self::DocumentValidationFailed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Errors raised by a [`ValidationEngine`](crate::engine::ValidationEngine).
#[derive(Error, Debug, Clone)]
pub enum EngineError {
    /// The schema definition is not something the engine can compile.
    #[error("schema compilation failed: {reason}")]
    Compile {
        /// Engine-reported reason.
        reason: String,
    },
}

/// Errors loading a [`ValidationConfig`](crate::config::ValidationConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable or config field had an unrecognized value.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// The variable or field name.
        key: String,
        /// The rejected value.
        value: String,
    },

    /// The config file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Read {
        /// Path of the config file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file could not be parsed.
    #[error("cannot parse config file {path}: {reason}")]
    Parse {
        /// Path of the config file.
        path: String,
        /// Parser message.
        reason: String,
    },
}

/// One constraint violation, stripped down to engine-agnostic fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorRecord {
    /// `title` of the schema node whose constraint failed, if it has one.
    pub title: Option<String>,
    /// `description` of the schema node whose constraint failed, if it has one.
    pub description: Option<String>,
    /// Human-readable description of the violation.
    pub message: String,
    /// JSON Pointer to the violating value within the document.
    pub instance_path: String,
}

impl fmt::Display for ValidationErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Everything needed to pinpoint why a document was rejected.
#[derive(Debug, Clone)]
pub struct DocumentValidationFailure {
    /// Normalized violations, at least one.
    pub errors: Vec<ValidationErrorRecord>,
    /// The sub-path that was validated against (`""` for the root).
    pub path: String,
    /// The rejected document.
    pub document: Value,
    /// The root schema definition, for diagnostics.
    pub schema: Value,
}

impl fmt::Display for DocumentValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.path.is_empty() {
            "(root)"
        } else {
            self.path.as_str()
        };
        write!(f, "{} validation error(s) at schema path {at}", self.errors.len())?;
        for record in &self.errors {
            write!(f, "\n  {record}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(instance_path: &str, message: &str) -> ValidationErrorRecord {
        ValidationErrorRecord {
            title: None,
            description: None,
            message: message.to_string(),
            instance_path: instance_path.to_string(),
        }
    }

    #[test]
    fn test_record_display_root() {
        let r = record("", r#""age" is a required property"#);
        assert_eq!(r.to_string(), r#"(root): "age" is a required property"#);
    }

    #[test]
    fn test_record_display_nested() {
        let r = record("/address/zip", "42 is not of type \"string\"");
        assert!(r.to_string().starts_with("/address/zip: "));
    }

    #[test]
    fn test_failure_display_lists_records() {
        let err = SchemaError::DocumentValidationFailed(Box::new(DocumentValidationFailure {
            errors: vec![record("", "a"), record("/b", "b")],
            path: "address".to_string(),
            document: json!({}),
            schema: json!({}),
        }));
        let s = err.to_string();
        assert!(s.starts_with("2 validation error(s) at schema path address"));
        assert!(s.contains("(root): a"));
        assert!(s.contains("/b: b"));
        assert_eq!(err.kind(), "document_validation_failed");
        assert!(err.as_validation_failure().is_some());
    }

    #[test]
    fn test_path_not_found_display() {
        let err = SchemaError::SchemaPathNotFound {
            path: "nonexistent.path".to_string(),
        };
        assert_eq!(err.to_string(), "no schema node at path 'nonexistent.path'");
        assert_eq!(err.kind(), "schema_path_not_found");
        assert!(err.as_validation_failure().is_none());
    }

    #[test]
    fn test_record_serializes_all_fields() {
        let r = ValidationErrorRecord {
            title: Some("Age".to_string()),
            description: None,
            message: "m".to_string(),
            instance_path: "/age".to_string(),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["title"], "Age");
        assert_eq!(v["description"], Value::Null);
        assert_eq!(v["instance_path"], "/age");
    }
}
