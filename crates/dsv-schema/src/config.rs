//! # Configuration
//!
//! [`ValidationConfig`] selects the JSON Schema draft validators are
//! compiled against and how schema warm-up is scheduled. It can be built in
//! code, read from `DSV_*` environment variables, or loaded from a YAML/JSON
//! file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable selecting the schema draft.
pub const ENV_SCHEMA_DRAFT: &str = "DSV_SCHEMA_DRAFT";
/// Environment variable selecting the warm-up mode.
pub const ENV_WARMUP: &str = "DSV_WARMUP";

/// JSON Schema draft used when compiling validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchemaDraft {
    /// Draft 4.
    #[serde(rename = "4")]
    Draft4,
    /// Draft 6.
    #[serde(rename = "6")]
    Draft6,
    /// Draft 7.
    #[serde(rename = "7")]
    Draft7,
    /// Draft 2019-09.
    #[serde(rename = "2019-09")]
    Draft201909,
    /// Draft 2020-12.
    #[default]
    #[serde(rename = "2020-12")]
    Draft202012,
}

impl SchemaDraft {
    /// Parse the textual draft name used in config and environment.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "4" => Some(Self::Draft4),
            "6" => Some(Self::Draft6),
            "7" => Some(Self::Draft7),
            "2019-09" => Some(Self::Draft201909),
            "2020-12" => Some(Self::Draft202012),
            _ => None,
        }
    }
}

/// When the root validator of a newly created schema gets compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarmupMode {
    /// Defer to idle time when a runtime is available, else compile inline.
    #[default]
    Idle,
    /// Compile inline during schema creation.
    Immediate,
    /// Never warm up; the first `validate` compiles.
    Disabled,
}

impl WarmupMode {
    /// Parse the textual mode name used in config and environment.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "idle" => Some(Self::Idle),
            "immediate" => Some(Self::Immediate),
            "disabled" | "off" => Some(Self::Disabled),
            _ => None,
        }
    }
}

/// Settings for a [`ValidationContext`](crate::context::ValidationContext).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Draft used by the JSON Schema engine.
    pub draft: SchemaDraft,
    /// Warm-up scheduling.
    pub warmup: WarmupMode,
}

impl ValidationConfig {
    /// Build from `DSV_SCHEMA_DRAFT` and `DSV_WARMUP`, using defaults for
    /// unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unrecognized values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` with the environment
    /// swapped out.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SCHEMA_DRAFT) {
            config.draft = SchemaDraft::parse(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_SCHEMA_DRAFT.to_string(),
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup(ENV_WARMUP) {
            config.warmup = WarmupMode::parse(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_WARMUP.to_string(),
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }

    /// Load from a YAML or JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        // YAML is a superset of JSON, one parser covers both.
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ValidationConfig::default();
        assert_eq!(config.draft, SchemaDraft::Draft202012);
        assert_eq!(config.warmup, WarmupMode::Idle);
    }

    #[test]
    fn test_from_lookup_empty_is_default() {
        let config = ValidationConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ValidationConfig::default());
    }

    #[test]
    fn test_from_lookup_values() {
        let config = ValidationConfig::from_lookup(lookup_from(&[
            (ENV_SCHEMA_DRAFT, "7"),
            (ENV_WARMUP, "Immediate"),
        ]))
        .unwrap();
        assert_eq!(config.draft, SchemaDraft::Draft7);
        assert_eq!(config.warmup, WarmupMode::Immediate);
    }

    #[test]
    fn test_from_lookup_invalid_draft() {
        let err = ValidationConfig::from_lookup(lookup_from(&[(ENV_SCHEMA_DRAFT, "2021")]))
            .unwrap_err();
        match err {
            ConfigError::InvalidValue { key, value } => {
                assert_eq!(key, ENV_SCHEMA_DRAFT);
                assert_eq!(value, "2021");
            }
            other => panic!("Expected InvalidValue, got: {other}"),
        }
    }

    #[test]
    fn test_warmup_off_alias() {
        assert_eq!(WarmupMode::parse("off"), Some(WarmupMode::Disabled));
        assert_eq!(WarmupMode::parse("sometimes"), None);
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dsv.yaml");
        std::fs::write(&path, "draft: \"2019-09\"\nwarmup: disabled\n").unwrap();
        let config = ValidationConfig::from_file(&path).unwrap();
        assert_eq!(config.draft, SchemaDraft::Draft201909);
        assert_eq!(config.warmup, WarmupMode::Disabled);
    }

    #[test]
    fn test_from_json_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dsv.json");
        std::fs::write(&path, r#"{"warmup": "immediate"}"#).unwrap();
        let config = ValidationConfig::from_file(&path).unwrap();
        assert_eq!(config.draft, SchemaDraft::Draft202012);
        assert_eq!(config.warmup, WarmupMode::Immediate);
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = ValidationConfig::from_file(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_from_file_bad_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dsv.yaml");
        std::fs::write(&path, "warmup: eventually\n").unwrap();
        let err = ValidationConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
