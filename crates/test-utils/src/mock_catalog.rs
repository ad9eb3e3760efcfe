// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock catalog implementation for testing
//!
//! Provides an in-memory catalog with builder pattern for easy test setup

use std::collections::BTreeMap;

use orapg_catalog::{
    Catalog, CatalogError, CatalogResult, FunctionMetadata, ObjectTypeMetadata, SynonymMetadata,
    TableMetadata, TypeMethodMetadata,
};

use crate::fixtures::CatalogFixtures;

/// In-memory mock catalog for testing
///
/// Tables and object types are keyed by `schema.name`, so adding one with
/// the same name replaces the earlier record.
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    tables: BTreeMap<String, TableMetadata>,
    type_methods: Vec<TypeMethodMetadata>,
    functions: Vec<FunctionMetadata>,
    synonyms: Vec<SynonymMetadata>,
    object_types: BTreeMap<String, ObjectTypeMetadata>,
    failure: Option<CatalogError>,
}

fn key(schema: &str, name: &str) -> String {
    format!("{}.{}", schema, name).to_lowercase()
}

impl MockCatalog {
    /// Create a new empty mock catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table to the catalog
    pub fn add_table(mut self, table: TableMetadata) -> Self {
        self.tables.insert(key(&table.schema, &table.name), table);
        self
    }

    pub fn add_type_method(mut self, method: TypeMethodMetadata) -> Self {
        self.type_methods.push(method);
        self
    }

    /// Add a function to the catalog
    pub fn add_function(mut self, function: FunctionMetadata) -> Self {
        self.functions.push(function);
        self
    }

    pub fn add_synonym(mut self, synonym: SynonymMetadata) -> Self {
        self.synonyms.push(synonym);
        self
    }

    /// Add an object type, replacing one with the same name
    pub fn add_object_type(mut self, object_type: ObjectTypeMetadata) -> Self {
        self.object_types
            .insert(key(&object_type.schema, &object_type.name), object_type);
        self
    }

    /// Make every listing fail with the given error
    pub fn fail_with(mut self, error: CatalogError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Get a table by `schema` and `name` (case-insensitive)
    pub fn get_table(&self, schema: &str, name: &str) -> Option<&TableMetadata> {
        self.tables.get(&key(schema, name))
    }

    fn check(&self) -> CatalogResult<()> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl Catalog for MockCatalog {
    async fn list_tables(&self) -> CatalogResult<Vec<TableMetadata>> {
        self.check()?;
        Ok(self.tables.values().cloned().collect())
    }

    async fn list_type_methods(&self) -> CatalogResult<Vec<TypeMethodMetadata>> {
        self.check()?;
        Ok(self.type_methods.clone())
    }

    async fn list_functions(&self) -> CatalogResult<Vec<FunctionMetadata>> {
        self.check()?;
        Ok(self.functions.clone())
    }

    async fn list_synonyms(&self) -> CatalogResult<Vec<SynonymMetadata>> {
        self.check()?;
        Ok(self.synonyms.clone())
    }

    async fn list_object_types(&self) -> CatalogResult<Vec<ObjectTypeMetadata>> {
        self.check()?;
        Ok(self.object_types.values().cloned().collect())
    }
}

/// Builder for creating mock catalogs with a fluent API
#[derive(Default)]
pub struct MockCatalogBuilder {
    catalog: MockCatalog,
}

impl MockCatalogBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the standard test schema
    ///
    /// HR: `langtable`, `employees`, object types `langy_type` and
    /// `address_type`, package `payroll`. SALES: `orders`, synonym `staff`.
    /// PUBLIC: synonyms `emp` and `addr_t`.
    pub fn with_standard_schema(mut self) -> Self {
        let mut catalog = self.catalog;
        for table in CatalogFixtures::tables() {
            catalog = catalog.add_table(table);
        }
        for method in CatalogFixtures::type_methods() {
            catalog = catalog.add_type_method(method);
        }
        for function in CatalogFixtures::functions() {
            catalog = catalog.add_function(function);
        }
        for synonym in CatalogFixtures::synonyms() {
            catalog = catalog.add_synonym(synonym);
        }
        for object_type in CatalogFixtures::object_types() {
            catalog = catalog.add_object_type(object_type);
        }
        self.catalog = catalog;
        self
    }

    /// Make `langy_type.de` a nested object type `detail_type(text, lang)`
    pub fn with_nested_object_types(mut self) -> Self {
        for object_type in CatalogFixtures::nested_object_types() {
            self.catalog = self.catalog.add_object_type(object_type);
        }
        self
    }

    /// Add a custom table
    pub fn with_table(mut self, table: TableMetadata) -> Self {
        self.catalog = self.catalog.add_table(table);
        self
    }

    /// Add a custom function
    pub fn with_function(mut self, function: FunctionMetadata) -> Self {
        self.catalog = self.catalog.add_function(function);
        self
    }

    pub fn with_synonym(mut self, synonym: SynonymMetadata) -> Self {
        self.catalog = self.catalog.add_synonym(synonym);
        self
    }

    pub fn with_object_type(mut self, object_type: ObjectTypeMetadata) -> Self {
        self.catalog = self.catalog.add_object_type(object_type);
        self
    }

    /// Build the mock catalog
    pub fn build(self) -> MockCatalog {
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_catalog_list_tables() {
        let catalog = MockCatalogBuilder::new().with_standard_schema().build();

        let tables = catalog.list_tables().await.unwrap();
        let table_names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
        assert!(table_names.contains(&"LANGTABLE"));
        assert!(table_names.contains(&"EMPLOYEES"));
        assert!(table_names.contains(&"ORDERS"));
    }

    #[tokio::test]
    async fn test_mock_catalog_get_table() {
        let catalog = MockCatalogBuilder::new().with_standard_schema().build();

        let langtable = catalog.get_table("hr", "langtable").unwrap();
        let langy = langtable.get_column("langy").unwrap();
        assert_eq!(langy.data_type, "LANGY_TYPE");
        assert_eq!(langy.data_type_owner.as_deref(), Some("HR"));
    }

    #[tokio::test]
    async fn test_nested_object_types_replace_flat_ones() {
        let catalog = MockCatalogBuilder::new()
            .with_standard_schema()
            .with_nested_object_types()
            .build();

        let object_types = catalog.list_object_types().await.unwrap();
        let langy = object_types
            .iter()
            .find(|t| t.name == "LANGY_TYPE")
            .unwrap();
        let de = langy.fields.iter().find(|f| f.name == "DE").unwrap();
        assert_eq!(de.data_type, "DETAIL_TYPE");
        assert!(object_types.iter().any(|t| t.name == "DETAIL_TYPE"));
        assert_eq!(object_types.iter().filter(|t| t.name == "LANGY_TYPE").count(), 1);
    }

    #[tokio::test]
    async fn test_mock_catalog_failure() {
        let catalog = MockCatalog::new().fail_with(CatalogError::QueryFailed("down".to_string()));
        assert!(catalog.list_tables().await.is_err());
        assert!(catalog.list_synonyms().await.is_err());
    }
}
