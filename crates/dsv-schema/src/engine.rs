//! # Validation Engine Seam
//!
//! The constraint-checking algorithm is a black box behind two traits:
//! [`ValidationEngine`] compiles a definition once, and the resulting
//! [`CompiledValidator`] checks any number of documents against it.
//!
//! [`JsonSchemaEngine`] is the production engine, backed by the
//! `jsonschema` crate. Its native violation records carry engine-specific
//! detail (`schema_path`, `keyword`) that the validation façade drops.

use jsonschema::{Draft, Validator};
use serde_json::Value;

use crate::config::SchemaDraft;
use crate::error::EngineError;

/// A violation as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeViolation {
    /// `title` of the schema node owning the failed keyword.
    pub title: Option<String>,
    /// `description` of the schema node owning the failed keyword.
    pub description: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// JSON Pointer into the document.
    pub instance_path: String,
    /// JSON Pointer into the bound definition, ending at the failed keyword.
    pub schema_path: String,
    /// The failed keyword (`type`, `required`, ...).
    pub keyword: String,
}

/// Compiles schema definitions into reusable validators.
pub trait ValidationEngine: Send + Sync {
    /// Compile a validator bound to `definition`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Compile`] for definitions the engine rejects.
    fn compile(&self, definition: &Value) -> Result<Box<dyn CompiledValidator>, EngineError>;
}

/// A validator bound to one schema definition.
pub trait CompiledValidator: Send + Sync {
    /// Check `document`, returning every violation found (empty when valid).
    fn check(&self, document: &Value) -> Vec<NativeViolation>;
}

/// [`ValidationEngine`] backed by the `jsonschema` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaEngine {
    draft: SchemaDraft,
}

impl JsonSchemaEngine {
    /// Engine compiling against the given draft.
    pub fn new(draft: SchemaDraft) -> Self {
        Self { draft }
    }

    /// The draft this engine compiles against.
    pub fn draft(&self) -> SchemaDraft {
        self.draft
    }
}

impl ValidationEngine for JsonSchemaEngine {
    fn compile(&self, definition: &Value) -> Result<Box<dyn CompiledValidator>, EngineError> {
        let validator = jsonschema::options()
            .with_draft(to_engine_draft(self.draft))
            .build(definition)
            .map_err(|e| EngineError::Compile {
                reason: e.to_string(),
            })?;

        Ok(Box::new(JsonSchemaValidator {
            validator,
            definition: definition.clone(),
        }))
    }
}

fn to_engine_draft(draft: SchemaDraft) -> Draft {
    match draft {
        SchemaDraft::Draft4 => Draft::Draft4,
        SchemaDraft::Draft6 => Draft::Draft6,
        SchemaDraft::Draft7 => Draft::Draft7,
        SchemaDraft::Draft201909 => Draft::Draft201909,
        SchemaDraft::Draft202012 => Draft::Draft202012,
    }
}

struct JsonSchemaValidator {
    validator: Validator,
    /// Kept to look up `title`/`description` of failing nodes.
    definition: Value,
}

impl CompiledValidator for JsonSchemaValidator {
    fn check(&self, document: &Value) -> Vec<NativeViolation> {
        self.validator
            .iter_errors(document)
            .map(|err| {
                let schema_path = err.schema_path.to_string();
                let (owner, keyword) = split_keyword(&schema_path);
                let node = self.definition.pointer(owner);
                NativeViolation {
                    title: string_field(node, "title"),
                    description: string_field(node, "description"),
                    message: err.to_string(),
                    instance_path: err.instance_path.to_string(),
                    keyword: keyword.to_string(),
                    schema_path,
                }
            })
            .collect()
    }
}

/// Split `/properties/age/type` into (`/properties/age`, `type`).
fn split_keyword(schema_path: &str) -> (&str, &str) {
    match schema_path.rfind('/') {
        Some(idx) => (&schema_path[..idx], &schema_path[idx + 1..]),
        None => ("", schema_path),
    }
}

fn string_field(node: Option<&Value>, field: &str) -> Option<String> {
    node.and_then(|n| n.get(field))
        .and_then(Value::as_str)
        .map(str::to_string)
}
