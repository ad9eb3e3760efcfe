// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures and sample catalog data

use orapg_catalog::{
    CatalogSnapshot, ColumnMetadata, FunctionMetadata, ObjectTypeField, ObjectTypeMetadata,
    SynonymMetadata, TableMetadata, TypeMethodMetadata,
};
use orapg_package::{FunctionSegment, PackageContext, PackageSegments, PackageVariable};

/// Catalog records of the standard test schema
///
/// Names are upper case, the way the Oracle data dictionary reports them.
pub struct CatalogFixtures;

impl CatalogFixtures {
    pub fn tables() -> Vec<TableMetadata> {
        vec![
            TableMetadata::new("HR", "LANGTABLE").with_columns(vec![
                ColumnMetadata::new("ID", "NUMBER"),
                ColumnMetadata::new("LANGY", "LANGY_TYPE").with_type_owner("HR"),
            ]),
            TableMetadata::new("HR", "EMPLOYEES").with_columns(vec![
                ColumnMetadata::new("EMPNO", "NUMBER"),
                ColumnMetadata::new("ENAME", "VARCHAR2"),
                ColumnMetadata::new("SAL", "NUMBER"),
                ColumnMetadata::new("ADDR", "ADDRESS_TYPE").with_type_owner("HR"),
            ]),
            TableMetadata::new("SALES", "ORDERS").with_columns(vec![
                ColumnMetadata::new("ID", "NUMBER"),
                ColumnMetadata::new("TOTAL", "NUMBER"),
            ]),
        ]
    }

    pub fn type_methods() -> Vec<TypeMethodMetadata> {
        vec![
            TypeMethodMetadata::new("HR", "ADDRESS_TYPE", "FORMAT"),
            TypeMethodMetadata::new("SALES", "MONEY_TYPE", "ROUND_TO"),
        ]
    }

    pub fn functions() -> Vec<FunctionMetadata> {
        vec![
            FunctionMetadata::new("HR", "GET_RATE").with_package("PAYROLL"),
            FunctionMetadata::new("HR", "RAISE").with_package("PAYROLL"),
            FunctionMetadata::new("HR", "CALC_BONUS"),
            FunctionMetadata::new("SALES", "BOOK").with_package("LEDGER"),
        ]
    }

    pub fn synonyms() -> Vec<SynonymMetadata> {
        vec![
            SynonymMetadata::new("PUBLIC", "EMP", "HR", "EMPLOYEES"),
            SynonymMetadata::new("PUBLIC", "ADDR_T", "HR", "ADDRESS_TYPE"),
            SynonymMetadata::new("SALES", "STAFF", "HR", "EMPLOYEES"),
        ]
    }

    /// `langy_type(de VARCHAR2, en VARCHAR2)` and `address_type(street, city)`
    pub fn object_types() -> Vec<ObjectTypeMetadata> {
        vec![
            ObjectTypeMetadata::new("HR", "LANGY_TYPE").with_fields(vec![
                ObjectTypeField::new("DE", "VARCHAR2"),
                ObjectTypeField::new("EN", "VARCHAR2"),
            ]),
            ObjectTypeMetadata::new("HR", "ADDRESS_TYPE").with_fields(vec![
                ObjectTypeField::new("STREET", "VARCHAR2"),
                ObjectTypeField::new("CITY", "VARCHAR2"),
            ]),
        ]
    }

    /// `langy_type(de DETAIL_TYPE, en VARCHAR2)` and `detail_type(text, lang)`
    pub fn nested_object_types() -> Vec<ObjectTypeMetadata> {
        vec![
            ObjectTypeMetadata::new("HR", "LANGY_TYPE").with_fields(vec![
                ObjectTypeField::new("DE", "DETAIL_TYPE"),
                ObjectTypeField::new("EN", "VARCHAR2"),
            ]),
            ObjectTypeMetadata::new("HR", "DETAIL_TYPE").with_fields(vec![
                ObjectTypeField::new("TEXT", "VARCHAR2"),
                ObjectTypeField::new("LANG", "VARCHAR2"),
            ]),
        ]
    }

    /// Standard schema as a snapshot
    pub fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot {
            tables: Self::tables(),
            type_methods: Self::type_methods(),
            functions: Self::functions(),
            synonyms: Self::synonyms(),
            object_types: Self::object_types(),
        }
    }

    /// Standard schema as JSON, the shape an export tool writes
    pub fn snapshot_json() -> String {
        serde_json::json!({
            "tables": [
                {
                    "schema": "HR",
                    "name": "LANGTABLE",
                    "columns": [
                        { "name": "ID", "data_type": "NUMBER" },
                        { "name": "LANGY", "data_type": "LANGY_TYPE", "data_type_owner": "HR" }
                    ]
                }
            ],
            "synonyms": [
                { "owner": "PUBLIC", "synonym_name": "LANGS", "table_owner": "HR", "table_name": "LANGTABLE" }
            ],
            "object_types": [
                {
                    "schema": "HR",
                    "name": "LANGY_TYPE",
                    "fields": [ { "name": "DE", "data_type": "VARCHAR2" } ]
                }
            ]
        })
        .to_string()
    }
}

/// Sample PL/SQL package sources
pub struct PackageFixtures;

impl PackageFixtures {
    /// Body of `hr.payroll`: two variables, a constant and two routines
    pub const fn payroll_body() -> &'static str {
        "CREATE OR REPLACE PACKAGE BODY payroll AS
  g_rate NUMBER := 0.1;
  FUNCTION get_rate RETURN NUMBER IS
  BEGIN
    RETURN g_rate;
  END;
  g_count NUMBER;
  PROCEDURE raise(p_pct NUMBER) IS
  BEGIN
    g_rate := g_rate * (1 + p_pct);
  END;
  c_max CONSTANT NUMBER := 1;
END payroll;"
    }

    /// Routine segments of [`payroll_body`](Self::payroll_body), located by keyword
    pub fn payroll_segments() -> PackageSegments {
        let body = Self::payroll_body();
        [("FUNCTION get_rate", "get_rate", true), ("PROCEDURE raise", "raise", false)]
            .into_iter()
            .filter_map(|(header, name, is_function)| {
                let start = body.find(header)?;
                let body_start = start + body[start..].find(" IS")? + 3;
                let body_end = start + body[start..].find("END;")?;
                Some(FunctionSegment::new(
                    name,
                    start,
                    body_end + "END;".len(),
                    body_start,
                    body_end,
                    is_function,
                ))
            })
            .collect()
    }

    /// Package context of `hr.payroll`
    pub fn payroll_context() -> PackageContext {
        let mut ctx = PackageContext::new("HR", "PAYROLL");
        ctx.add_variable(PackageVariable::new("G_RATE", "NUMBER").with_default("0.1"));
        ctx.add_variable(PackageVariable::new("G_COUNT", "NUMBER"));
        ctx.add_variable(PackageVariable::new("C_MAX", "NUMBER").with_default("1").constant());
        ctx
    }
}
