// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the catalog crate

use orapg_catalog::{
    Catalog, CatalogError, CatalogResult, CatalogSnapshot, ColumnMetadata, FunctionMetadata,
    MethodType, ObjectTypeField, ObjectTypeMetadata, StaticCatalog, SynonymMetadata,
    TableMetadata, TypeMethodMetadata,
};

// Mock catalog implementation for integration testing
struct TestCatalog;

#[async_trait::async_trait]
impl Catalog for TestCatalog {
    async fn list_tables(&self) -> CatalogResult<Vec<TableMetadata>> {
        Ok(vec![
            TableMetadata::new("HR", "EMPLOYEES").with_columns(vec![
                ColumnMetadata::new("EMPNO", "NUMBER"),
                ColumnMetadata::new("ENAME", "VARCHAR2"),
                ColumnMetadata::new("ADDR", "ADDRESS_TYPE").with_type_owner("HR"),
            ]),
            TableMetadata::new("SALES", "ORDERS")
                .with_columns(vec![ColumnMetadata::new("ID", "NUMBER")]),
        ])
    }

    async fn list_type_methods(&self) -> CatalogResult<Vec<TypeMethodMetadata>> {
        Ok(vec![
            TypeMethodMetadata::new("HR", "ADDRESS_TYPE", "FORMAT"),
            TypeMethodMetadata::new("HR", "ADDRESS_TYPE", "PARSE")
                .with_method_type(MethodType::Function)
                .with_static(),
        ])
    }

    async fn list_functions(&self) -> CatalogResult<Vec<FunctionMetadata>> {
        Ok(vec![
            FunctionMetadata::new("HR", "GET_SALARY"),
            FunctionMetadata::new("HR", "RAISE").with_package("PAYROLL"),
        ])
    }

    async fn list_synonyms(&self) -> CatalogResult<Vec<SynonymMetadata>> {
        Ok(vec![SynonymMetadata::new(
            "PUBLIC",
            "EMP",
            "HR",
            "EMPLOYEES",
        )])
    }
}

struct FailingCatalog;

#[async_trait::async_trait]
impl Catalog for FailingCatalog {
    async fn list_tables(&self) -> CatalogResult<Vec<TableMetadata>> {
        Err(CatalogError::QueryFailed("ORA-00942".to_string()))
    }

    async fn list_type_methods(&self) -> CatalogResult<Vec<TypeMethodMetadata>> {
        Ok(Vec::new())
    }

    async fn list_functions(&self) -> CatalogResult<Vec<FunctionMetadata>> {
        Ok(Vec::new())
    }

    async fn list_synonyms(&self) -> CatalogResult<Vec<SynonymMetadata>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_custom_type_column_owner() {
    let tables = TestCatalog.list_tables().await.unwrap();
    let employees = &tables[0];

    let addr = employees.get_column("addr").unwrap();
    assert_eq!(addr.data_type, "ADDRESS_TYPE");
    assert_eq!(addr.data_type_owner.as_deref(), Some("HR"));

    let ename = employees.get_column("ENAME").unwrap();
    assert!(ename.data_type_owner.is_none());
}

#[tokio::test]
async fn test_object_types_default_to_empty() {
    let object_types = TestCatalog.list_object_types().await.unwrap();
    assert!(object_types.is_empty());
}

#[tokio::test]
async fn test_package_membership() {
    let functions = TestCatalog.list_functions().await.unwrap();
    let packaged: Vec<_> = functions.iter().filter(|f| f.is_package_member()).collect();
    assert_eq!(packaged.len(), 1);
    assert_eq!(packaged[0].package_name.as_deref(), Some("PAYROLL"));
}

#[tokio::test]
async fn test_static_method_flag() {
    let methods = TestCatalog.list_type_methods().await.unwrap();
    assert!(!methods[0].is_static);
    assert!(methods[1].is_static);
}

#[tokio::test]
async fn test_collect_snapshot_from_custom_catalog() {
    let snapshot = CatalogSnapshot::collect(&TestCatalog).await.unwrap();
    assert_eq!(snapshot.tables.len(), 2);
    assert_eq!(snapshot.type_methods.len(), 2);
    assert_eq!(snapshot.functions.len(), 2);
    assert_eq!(snapshot.synonyms.len(), 1);
}

#[tokio::test]
async fn test_collect_propagates_errors() {
    let result = CatalogSnapshot::collect(&FailingCatalog).await;
    match result {
        Err(CatalogError::QueryFailed(msg)) => assert!(msg.contains("ORA-00942")),
        other => panic!("Expected QueryFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_json_serialization_roundtrip() {
    let snapshot = CatalogSnapshot::collect(&TestCatalog)
        .await
        .unwrap()
        .with_object_type(ObjectTypeMetadata::new("HR", "ADDRESS_TYPE").with_fields(vec![
            ObjectTypeField::new("STREET", "VARCHAR2"),
            ObjectTypeField::new("CITY", "VARCHAR2"),
        ]));

    let json = snapshot.to_json_string().unwrap();
    let restored = CatalogSnapshot::from_json_str(&json).unwrap();
    assert_eq!(restored, snapshot);

    let catalog = StaticCatalog::new(restored);
    let object_types = catalog.list_object_types().await.unwrap();
    assert_eq!(object_types[0].fields.len(), 2);
}

#[tokio::test]
async fn test_error_display() {
    let error = CatalogError::QueryFailed("timeout".to_string());
    assert!(format!("{}", error).contains("Catalog query failed"));

    let error = CatalogError::SerializationError("bad json".to_string());
    assert!(format!("{}", error).contains("bad json"));

    let error = CatalogError::NotSupported("object types".to_string());
    assert!(format!("{}", error).contains("listing not supported"));
}
