// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Static Catalog
//!
//! This module provides a catalog backed by a snapshot of exported records.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use orapg_catalog::{CatalogSnapshot, StaticCatalog};
//!
//! let snapshot = CatalogSnapshot::from_json_str(&std::fs::read_to_string("hr.json")?)?;
//! let catalog = StaticCatalog::new(snapshot);
//! let tables = catalog.list_tables().await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metadata::{
    FunctionMetadata, ObjectTypeMetadata, SynonymMetadata, TableMetadata, TypeMethodMetadata,
};
use crate::{Catalog, CatalogResult};

/// Exported catalog records
///
/// Every list may contain records from any number of schemas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub tables: Vec<TableMetadata>,
    #[serde(default)]
    pub type_methods: Vec<TypeMethodMetadata>,
    #[serde(default)]
    pub functions: Vec<FunctionMetadata>,
    #[serde(default)]
    pub synonyms: Vec<SynonymMetadata>,
    #[serde(default)]
    pub object_types: Vec<ObjectTypeMetadata>,
}

impl CatalogSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from JSON text
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        debug!(
            tables = snapshot.tables.len(),
            synonyms = snapshot.synonyms.len(),
            "Loaded catalog snapshot from JSON"
        );
        Ok(snapshot)
    }

    /// Parse a snapshot from YAML text
    pub fn from_yaml_str(yaml: &str) -> CatalogResult<Self> {
        let snapshot: Self = serde_yaml::from_str(yaml)?;
        debug!(
            tables = snapshot.tables.len(),
            synonyms = snapshot.synonyms.len(),
            "Loaded catalog snapshot from YAML"
        );
        Ok(snapshot)
    }

    /// Serialize the snapshot as pretty-printed JSON
    pub fn to_json_string(&self) -> CatalogResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read every list from another catalog into a snapshot
    pub async fn collect(catalog: &dyn Catalog) -> CatalogResult<Self> {
        Ok(Self {
            tables: catalog.list_tables().await?,
            type_methods: catalog.list_type_methods().await?,
            functions: catalog.list_functions().await?,
            synonyms: catalog.list_synonyms().await?,
            object_types: catalog.list_object_types().await?,
        })
    }

    /// Builder method: add a table
    pub fn with_table(mut self, table: TableMetadata) -> Self {
        self.tables.push(table);
        self
    }

    /// Builder method: add a type method
    pub fn with_type_method(mut self, method: TypeMethodMetadata) -> Self {
        self.type_methods.push(method);
        self
    }

    /// Builder method: add a routine
    pub fn with_function(mut self, function: FunctionMetadata) -> Self {
        self.functions.push(function);
        self
    }

    /// Builder method: add a synonym
    pub fn with_synonym(mut self, synonym: SynonymMetadata) -> Self {
        self.synonyms.push(synonym);
        self
    }

    /// Builder method: add an object type
    pub fn with_object_type(mut self, object_type: ObjectTypeMetadata) -> Self {
        self.object_types.push(object_type);
        self
    }
}

/// Catalog serving records from a fixed snapshot
///
/// Used when metadata was exported ahead of time and for testing without a
/// database.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    snapshot: CatalogSnapshot,
}

impl StaticCatalog {
    /// Create a static catalog over a snapshot
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot }
    }

    /// Create a catalog with no records
    pub fn empty() -> Self {
        Self::default()
    }

    /// Access the underlying snapshot
    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn list_tables(&self) -> CatalogResult<Vec<TableMetadata>> {
        Ok(self.snapshot.tables.clone())
    }

    async fn list_type_methods(&self) -> CatalogResult<Vec<TypeMethodMetadata>> {
        Ok(self.snapshot.type_methods.clone())
    }

    async fn list_functions(&self) -> CatalogResult<Vec<FunctionMetadata>> {
        Ok(self.snapshot.functions.clone())
    }

    async fn list_synonyms(&self) -> CatalogResult<Vec<SynonymMetadata>> {
        Ok(self.snapshot.synonyms.clone())
    }

    async fn list_object_types(&self) -> CatalogResult<Vec<ObjectTypeMetadata>> {
        Ok(self.snapshot.object_types.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ColumnMetadata;
    use crate::CatalogError;

    fn hr_snapshot() -> CatalogSnapshot {
        CatalogSnapshot::new()
            .with_table(
                TableMetadata::new("HR", "EMPLOYEES")
                    .with_columns(vec![ColumnMetadata::new("ENAME", "VARCHAR2")]),
            )
            .with_synonym(SynonymMetadata::new("PUBLIC", "EMP", "HR", "EMPLOYEES"))
    }

    #[tokio::test]
    async fn test_static_catalog_lists_snapshot() {
        let catalog = StaticCatalog::new(hr_snapshot());
        assert_eq!(catalog.list_tables().await.unwrap().len(), 1);
        assert_eq!(catalog.list_synonyms().await.unwrap().len(), 1);
        assert!(catalog.list_functions().await.unwrap().is_empty());
        assert!(catalog.list_object_types().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let catalog = StaticCatalog::empty();
        assert!(catalog.list_tables().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_collect_copies_every_list() {
        let catalog = StaticCatalog::new(hr_snapshot());
        let collected = CatalogSnapshot::collect(&catalog).await.unwrap();
        assert_eq!(&collected, catalog.snapshot());
    }

    #[test]
    fn test_from_json_missing_lists_default_to_empty() {
        let snapshot = CatalogSnapshot::from_json_str(r#"{"tables": []}"#).unwrap();
        assert!(snapshot.synonyms.is_empty());
        assert!(snapshot.object_types.is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        let result = CatalogSnapshot::from_json_str("{not json");
        assert!(matches!(result, Err(CatalogError::SerializationError(_))));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
tables:
  - schema: HR
    name: LANGTABLE
    columns:
      - name: LANGY
        data_type: LANGY_TYPE
        data_type_owner: HR
"#;
        let snapshot = CatalogSnapshot::from_yaml_str(yaml).unwrap();
        let column = &snapshot.tables[0].columns[0];
        assert_eq!(column.data_type_owner.as_deref(), Some("HR"));
    }
}
