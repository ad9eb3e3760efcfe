// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Metadata Index Builder
//!
//! Builds a [`MetadataIndex`] from catalog records, keeping only the
//! requested schemas.
//!
//! ## Filtering
//!
//! Catalogs routinely hold many schemas the transformation does not care
//! about. Tables, type methods, package functions and object types owned by
//! other schemas are skipped without error. Synonyms are indexed for every
//! owner, since public synonyms must stay reachable whatever schemas were
//! requested.

use std::collections::{HashMap, HashSet};

use orapg_catalog::{Catalog, CatalogSnapshot};
use orapg_ir::names::{normalize, qualify};
use orapg_ir::ColumnTypeInfo;
use tracing::{debug, info, instrument};

use crate::config::SessionConfig;
use crate::error::{SemanticError, SemanticResult};
use crate::index::MetadataIndex;

/// Builds metadata indices from catalog records
pub struct MetadataIndexBuilder;

impl MetadataIndexBuilder {
    /// Read all records from a catalog and index the requested schemas
    ///
    /// # Errors
    ///
    /// - `SemanticError::InvalidArgument` if `schemas` is empty or holds a
    ///   blank name (checked before the catalog is read)
    /// - `SemanticError::Catalog` if reading the catalog fails
    #[instrument(skip_all, fields(schemas = schemas.len()))]
    pub async fn build<S: AsRef<str>>(
        catalog: &dyn Catalog,
        schemas: &[S],
    ) -> SemanticResult<MetadataIndex> {
        let requested = Self::normalize_schemas(schemas)?;
        let snapshot = CatalogSnapshot::collect(catalog).await?;
        Ok(Self::index_snapshot(&snapshot, &requested))
    }

    /// Validate a session configuration and build the index for its schemas
    pub async fn build_for_session(
        catalog: &dyn Catalog,
        config: &SessionConfig,
    ) -> SemanticResult<MetadataIndex> {
        config.validate()?;
        Self::build(catalog, &config.normalized_schemas()).await
    }

    /// Index the requested schemas of an already loaded snapshot
    pub fn build_from_snapshot<S: AsRef<str>>(
        snapshot: &CatalogSnapshot,
        schemas: &[S],
    ) -> SemanticResult<MetadataIndex> {
        let requested = Self::normalize_schemas(schemas)?;
        Ok(Self::index_snapshot(snapshot, &requested))
    }

    /// Index with no entries, for use without a catalog
    pub fn build_empty() -> MetadataIndex {
        MetadataIndex::empty()
    }

    fn normalize_schemas<S: AsRef<str>>(schemas: &[S]) -> SemanticResult<HashSet<String>> {
        if schemas.is_empty() {
            return Err(SemanticError::InvalidArgument(
                "schemas list cannot be empty".to_string(),
            ));
        }

        schemas
            .iter()
            .map(|schema| {
                let schema = schema.as_ref().trim();
                if schema.is_empty() {
                    Err(SemanticError::InvalidArgument(
                        "schema name cannot be blank".to_string(),
                    ))
                } else {
                    Ok(normalize(schema))
                }
            })
            .collect()
    }

    fn index_snapshot(snapshot: &CatalogSnapshot, schemas: &HashSet<String>) -> MetadataIndex {
        info!("Building metadata index for {} schemas", schemas.len());

        let table_columns = Self::index_table_columns(snapshot, schemas);
        let type_methods = Self::index_type_methods(snapshot, schemas);
        let package_functions = Self::index_package_functions(snapshot, schemas);
        let synonyms = Self::index_synonyms(snapshot);
        let (type_field_types, object_type_names) = Self::index_object_types(snapshot, schemas);

        let index = MetadataIndex::new(
            table_columns,
            type_methods,
            package_functions,
            synonyms,
            type_field_types,
            object_type_names,
        );

        info!(stats = %index.stats(), "Metadata index built");
        index
    }

    fn index_table_columns(
        snapshot: &CatalogSnapshot,
        schemas: &HashSet<String>,
    ) -> HashMap<String, HashMap<String, ColumnTypeInfo>> {
        let mut index = HashMap::new();
        let mut column_count = 0;

        for table in &snapshot.tables {
            let schema = normalize(&table.schema);
            if !schemas.contains(&schema) {
                continue;
            }

            let columns: HashMap<String, ColumnTypeInfo> = table
                .columns
                .iter()
                .map(|column| {
                    let owner = column.data_type_owner.as_deref().map(normalize);
                    (
                        normalize(&column.name),
                        ColumnTypeInfo::new(column.data_type.clone(), owner),
                    )
                })
                .collect();

            column_count += columns.len();
            index.insert(qualify(&schema, &table.name), columns);
        }

        debug!(columns = column_count, tables = index.len(), "Indexed table columns");
        index
    }

    fn index_type_methods(
        snapshot: &CatalogSnapshot,
        schemas: &HashSet<String>,
    ) -> HashMap<String, HashSet<String>> {
        let mut index: HashMap<String, HashSet<String>> = HashMap::new();
        let mut method_count = 0;

        for method in &snapshot.type_methods {
            let schema = normalize(&method.schema);
            if !schemas.contains(&schema) {
                continue;
            }

            index
                .entry(qualify(&schema, &method.type_name))
                .or_default()
                .insert(normalize(&method.method_name));
            method_count += 1;
        }

        debug!(methods = method_count, types = index.len(), "Indexed type methods");
        index
    }

    fn index_package_functions(
        snapshot: &CatalogSnapshot,
        schemas: &HashSet<String>,
    ) -> HashSet<String> {
        let index: HashSet<String> = snapshot
            .functions
            .iter()
            .filter(|function| function.is_package_member())
            .filter_map(|function| {
                let schema = normalize(&function.schema);
                let package = function.package_name.as_deref()?;
                schemas.contains(&schema).then(|| {
                    format!(
                        "{}.{}.{}",
                        schema,
                        normalize(package),
                        normalize(&function.object_name)
                    )
                })
            })
            .collect();

        debug!(functions = index.len(), "Indexed package functions");
        index
    }

    fn index_synonyms(snapshot: &CatalogSnapshot) -> HashMap<String, HashMap<String, String>> {
        let mut index: HashMap<String, HashMap<String, String>> = HashMap::new();

        for synonym in &snapshot.synonyms {
            index
                .entry(normalize(&synonym.owner))
                .or_default()
                .insert(
                    normalize(&synonym.synonym_name),
                    qualify(&synonym.table_owner, &synonym.table_name),
                );
        }

        debug!(
            synonyms = index.values().map(HashMap::len).sum::<usize>(),
            schemas = index.len(),
            "Indexed synonyms"
        );
        index
    }

    fn index_object_types(
        snapshot: &CatalogSnapshot,
        schemas: &HashSet<String>,
    ) -> (HashMap<String, HashMap<String, String>>, HashSet<String>) {
        let mut fields_index = HashMap::new();
        let mut names = HashSet::new();

        for object_type in &snapshot.object_types {
            let schema = normalize(&object_type.schema);
            if !schemas.contains(&schema) {
                continue;
            }

            let qualified = qualify(&schema, &object_type.name);
            let fields: HashMap<String, String> = object_type
                .fields
                .iter()
                .map(|field| (normalize(&field.name), field.data_type.clone()))
                .collect();

            fields_index.insert(qualified.clone(), fields);
            names.insert(qualified);
        }

        debug!(object_types = names.len(), "Indexed object types");
        (fields_index, names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orapg_catalog::{
        ColumnMetadata, FunctionMetadata, ObjectTypeField, ObjectTypeMetadata, StaticCatalog,
        SynonymMetadata, TableMetadata, TypeMethodMetadata,
    };

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot::new()
            .with_table(TableMetadata::new("HR", "EMPLOYEES").with_columns(vec![
                ColumnMetadata::new("ENAME", "VARCHAR2"),
                ColumnMetadata::new("ADDR", "ADDRESS_TYPE").with_type_owner("HR"),
            ]))
            .with_table(
                TableMetadata::new("SALES", "ORDERS")
                    .with_columns(vec![ColumnMetadata::new("ID", "NUMBER")]),
            )
            .with_type_method(TypeMethodMetadata::new("HR", "ADDRESS_TYPE", "FORMAT"))
            .with_type_method(TypeMethodMetadata::new("SALES", "MONEY_TYPE", "ROUND"))
            .with_function(FunctionMetadata::new("HR", "GET_RATE").with_package("PAYROLL"))
            .with_function(FunctionMetadata::new("HR", "STANDALONE"))
            .with_function(FunctionMetadata::new("SALES", "BOOK").with_package("LEDGER"))
            .with_synonym(SynonymMetadata::new("PUBLIC", "EMP", "HR", "EMPLOYEES"))
            .with_synonym(SynonymMetadata::new("SALES", "ORD", "SALES", "ORDERS"))
            .with_object_type(
                ObjectTypeMetadata::new("HR", "ADDRESS_TYPE")
                    .with_fields(vec![ObjectTypeField::new("STREET", "VARCHAR2")]),
            )
    }

    #[test]
    fn test_empty_schema_list_rejected() {
        let empty: [&str; 0] = [];
        let result = MetadataIndexBuilder::build_from_snapshot(&snapshot(), &empty);
        assert!(matches!(result, Err(SemanticError::InvalidArgument(_))));
    }

    #[test]
    fn test_blank_schema_rejected() {
        let result = MetadataIndexBuilder::build_from_snapshot(&snapshot(), &["hr", " "]);
        assert!(matches!(result, Err(SemanticError::InvalidArgument(_))));
    }

    #[test]
    fn test_filters_to_requested_schemas() {
        let index = MetadataIndexBuilder::build_from_snapshot(&snapshot(), &["Hr"]).unwrap();

        assert!(index.has_table("hr.employees"));
        assert!(!index.has_table("sales.orders"));
        assert!(index.has_type_method("hr.address_type", "format"));
        assert!(!index.has_type_method("sales.money_type", "round"));
        assert!(index.is_package_function("hr.payroll.get_rate"));
        assert!(!index.is_package_function("sales.ledger.book"));
        assert_eq!(index.all_package_functions().len(), 1);
    }

    #[test]
    fn test_synonyms_indexed_for_all_owners() {
        let index = MetadataIndexBuilder::build_from_snapshot(&snapshot(), &["hr"]).unwrap();
        assert_eq!(index.resolve_synonym("hr", "emp"), Some("hr.employees"));
        assert_eq!(index.resolve_synonym("sales", "ord"), Some("sales.orders"));
    }

    #[test]
    fn test_column_owner_lowercased_type_name_kept() {
        let index = MetadataIndexBuilder::build_from_snapshot(&snapshot(), &["hr"]).unwrap();
        let addr = index.get_column_type("hr.employees", "addr").unwrap();
        assert_eq!(addr.type_name(), "ADDRESS_TYPE");
        assert_eq!(addr.type_owner(), Some("hr"));
        assert!(addr.is_custom_type());
    }

    #[test]
    fn test_object_types_indexed() {
        let index = MetadataIndexBuilder::build_from_snapshot(&snapshot(), &["hr"]).unwrap();
        assert!(index.is_object_type("hr.address_type"));
        assert_eq!(index.get_field_type("hr.address_type", "street"), Some("VARCHAR2"));
    }

    #[test]
    fn test_build_empty() {
        let index = MetadataIndexBuilder::build_empty();
        assert_eq!(index.table_count(), 0);
        assert!(index.all_synonyms().is_empty());
    }

    #[tokio::test]
    async fn test_build_from_catalog() {
        let catalog = StaticCatalog::new(snapshot());
        let index = MetadataIndexBuilder::build(&catalog, &["hr", "sales"])
            .await
            .unwrap();
        assert_eq!(index.table_count(), 2);
        assert!(index.is_package_function("sales.ledger.book"));
    }

    #[tokio::test]
    async fn test_build_for_session_validates_config() {
        let catalog = StaticCatalog::new(snapshot());
        let result = MetadataIndexBuilder::build_for_session(&catalog, &SessionConfig::default()).await;
        assert!(matches!(result, Err(SemanticError::Config(_))));

        let config = SessionConfig::new("SALES");
        let index = MetadataIndexBuilder::build_for_session(&catalog, &config)
            .await
            .unwrap();
        assert!(index.has_table("sales.orders"));
        assert!(!index.has_table("hr.employees"));
    }
}
