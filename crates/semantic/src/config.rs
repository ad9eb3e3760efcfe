// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Session Configuration
//!
//! Settings shared by every unit transformed in one session: which schemas
//! are indexed and which schema unqualified names default to.
//!
//! ## Example
//!
//! ```
//! use orapg_semantic::SessionConfig;
//!
//! let config = SessionConfig::new("HR").with_schema("SALES");
//! assert!(config.validate().is_ok());
//! assert_eq!(config.normalized_schemas(), vec!["hr", "sales"]);
//! assert_eq!(config.current_schema(), Some("hr".to_string()));
//! ```

use orapg_ir::names::normalize;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Session configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Schemas whose records are indexed
    #[serde(default)]
    pub schemas: Vec<String>,

    /// Schema unqualified names resolve against.
    /// Falls back to the first requested schema when unset.
    #[serde(default)]
    pub current_schema: Option<String>,
}

impl SessionConfig {
    /// Create a configuration indexing a single schema
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schemas: vec![schema.into()],
            current_schema: None,
        }
    }

    /// Builder method: index another schema
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schemas.push(schema.into());
        self
    }

    /// Builder method: set the current schema
    pub fn with_current_schema(mut self, schema: impl Into<String>) -> Self {
        self.current_schema = Some(schema.into());
        self
    }

    /// Requested schemas, lowercased and without duplicates, in order
    pub fn normalized_schemas(&self) -> Vec<String> {
        let mut schemas: Vec<String> = Vec::with_capacity(self.schemas.len());
        for schema in &self.schemas {
            let normalized = normalize(schema.trim());
            if !normalized.is_empty() && !schemas.contains(&normalized) {
                schemas.push(normalized);
            }
        }
        schemas
    }

    /// Lowercased current schema (explicit or first requested schema)
    pub fn current_schema(&self) -> Option<String> {
        match &self.current_schema {
            Some(schema) => Some(normalize(schema.trim())),
            None => self.normalized_schemas().into_iter().next(),
        }
    }

    /// Validate the configuration
    ///
    /// Checks that:
    /// - At least one schema is requested and none is blank
    /// - The current schema, when set, is one of the requested schemas
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schemas.is_empty() {
            return Err(ConfigError::NoSchemas);
        }

        if self.schemas.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::BlankSchemaName);
        }

        if let Some(current) = &self.current_schema {
            let current = normalize(current.trim());
            if !self.normalized_schemas().contains(&current) {
                return Err(ConfigError::CurrentSchemaNotIndexed { schema: current });
            }
        }

        Ok(())
    }

    /// Parse session config from a settings payload.
    ///
    /// Expected shape:
    /// {
    ///   "orapg": {
    ///     "schemas": ["HR", "SALES"],
    ///     "currentSchema": "HR"
    ///   }
    /// }
    pub fn from_settings(settings: &Value) -> Option<Self> {
        let orapg = settings.get("orapg")?;

        let schemas: Vec<String> = orapg
            .get("schemas")?
            .as_array()?
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();

        if schemas.is_empty() {
            return None;
        }

        let current_schema = orapg
            .get("currentSchema")
            .and_then(Value::as_str)
            .map(str::to_string);

        Some(Self {
            schemas,
            current_schema,
        })
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No schema requested
    #[error("At least one schema is required")]
    NoSchemas,

    /// A requested schema name is blank
    #[error("Schema names cannot be blank")]
    BlankSchemaName,

    /// Current schema outside the requested set
    #[error("Current schema '{schema}' is not among the indexed schemas")]
    CurrentSchemaNotIndexed { schema: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_invalid() {
        assert_eq!(SessionConfig::default().validate(), Err(ConfigError::NoSchemas));
    }

    #[test]
    fn test_blank_schema_rejected() {
        let config = SessionConfig::new("hr").with_schema("  ");
        assert_eq!(config.validate(), Err(ConfigError::BlankSchemaName));
    }

    #[test]
    fn test_current_schema_must_be_indexed() {
        let config = SessionConfig::new("hr").with_current_schema("sales");
        let err = config.validate().unwrap_err();
        assert!(format!("{}", err).contains("sales"));

        let config = SessionConfig::new("HR").with_current_schema("hr");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_normalized_schemas_dedup() {
        let config = SessionConfig::new("HR").with_schema("hr").with_schema("Sales");
        assert_eq!(config.normalized_schemas(), vec!["hr", "sales"]);
    }

    #[test]
    fn test_padded_mixed_case_current_schema() {
        let config = SessionConfig::new(" HR ").with_current_schema("  Hr");
        assert!(config.validate().is_ok());
        assert_eq!(config.normalized_schemas(), vec!["hr"]);
        assert_eq!(config.current_schema(), Some("hr".to_string()));
    }

    #[test]
    fn test_current_schema_falls_back_to_first() {
        let config = SessionConfig::new("Sales").with_schema("HR");
        assert_eq!(config.current_schema(), Some("sales".to_string()));

        let config = config.with_current_schema("HR");
        assert_eq!(config.current_schema(), Some("hr".to_string()));
    }

    #[test]
    fn test_from_settings() {
        let settings = json!({
            "orapg": {
                "schemas": ["HR", "SALES"],
                "currentSchema": "SALES"
            }
        });
        let config = SessionConfig::from_settings(&settings).unwrap();
        assert_eq!(config.schemas, vec!["HR", "SALES"]);
        assert_eq!(config.current_schema(), Some("sales".to_string()));
    }

    #[test]
    fn test_from_settings_missing_section() {
        assert!(SessionConfig::from_settings(&json!({})).is_none());
        assert!(SessionConfig::from_settings(&json!({"orapg": {"schemas": []}})).is_none());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let config: SessionConfig =
            serde_json::from_value(json!({"schemas": ["hr"], "currentSchema": "hr"})).unwrap();
        assert_eq!(config.current_schema.as_deref(), Some("hr"));
    }
}
