// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Metadata Index
//!
//! Read-only lookup tables built once per session from catalog records and
//! shared by every resolution context of that session.
//!
//! ## Keys
//!
//! All keys are lowercase and schema-qualified:
//! - tables and types: `schema.name`
//! - package functions: `schema.package.function`
//! - synonyms: grouped by owning schema (`public` for public synonyms)
//!
//! Query methods accept mixed-case names and lowercase them before lookup.
//! A missing key is a normal outcome and yields `None` or `false`.

use std::collections::{HashMap, HashSet};
use std::fmt;

use orapg_ir::names::{normalize, PUBLIC_SCHEMA};
use orapg_ir::ColumnTypeInfo;
use serde::Serialize;

/// Immutable metadata lookup tables
///
/// The index owns its maps; there is no mutation method after construction.
/// Share it across contexts and threads through `Arc<MetadataIndex>`.
#[derive(Debug, Clone, Default)]
pub struct MetadataIndex {
    table_columns: HashMap<String, HashMap<String, ColumnTypeInfo>>,
    type_methods: HashMap<String, HashSet<String>>,
    package_functions: HashSet<String>,
    synonyms: HashMap<String, HashMap<String, String>>,
    type_field_types: HashMap<String, HashMap<String, String>>,
    object_type_names: HashSet<String>,
}

/// Entry counts of a [`MetadataIndex`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub tables: usize,
    pub columns: usize,
    pub types_with_methods: usize,
    pub package_functions: usize,
    pub synonym_schemas: usize,
    pub synonyms: usize,
    pub object_types: usize,
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tables, {} types with methods, {} package functions, {} synonym schemas, {} object types",
            self.tables,
            self.types_with_methods,
            self.package_functions,
            self.synonym_schemas,
            self.object_types
        )
    }
}

impl MetadataIndex {
    /// Create an index from prepared lookup tables
    ///
    /// The maps are taken by value and their keys are lowercased, so the
    /// index never observes later changes made to the caller's copies.
    ///
    /// # Arguments
    ///
    /// * `table_columns` - `schema.table` → column name → column type
    /// * `type_methods` - `schema.type` → method names
    /// * `package_functions` - `schema.package.function` names
    /// * `synonyms` - owning schema → synonym name → `schema.target`
    /// * `type_field_types` - `schema.type` → field name → field type name
    /// * `object_type_names` - `schema.type` names of object types
    pub fn new(
        table_columns: HashMap<String, HashMap<String, ColumnTypeInfo>>,
        type_methods: HashMap<String, HashSet<String>>,
        package_functions: HashSet<String>,
        synonyms: HashMap<String, HashMap<String, String>>,
        type_field_types: HashMap<String, HashMap<String, String>>,
        object_type_names: HashSet<String>,
    ) -> Self {
        Self {
            table_columns: table_columns
                .into_iter()
                .map(|(table, columns)| (normalize(&table), lowercase_keys(columns)))
                .collect(),
            type_methods: type_methods
                .into_iter()
                .map(|(ty, methods)| (normalize(&ty), methods.iter().map(|m| normalize(m)).collect()))
                .collect(),
            package_functions: package_functions.iter().map(|f| normalize(f)).collect(),
            synonyms: synonyms
                .into_iter()
                .map(|(schema, entries)| {
                    let entries = entries
                        .into_iter()
                        .map(|(name, target)| (normalize(&name), normalize(&target)))
                        .collect();
                    (normalize(&schema), entries)
                })
                .collect(),
            type_field_types: type_field_types
                .into_iter()
                .map(|(ty, fields)| (normalize(&ty), lowercase_keys(fields)))
                .collect(),
            object_type_names: object_type_names.iter().map(|t| normalize(t)).collect(),
        }
    }

    /// Create an index with no entries
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the declared type of a column
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::{HashMap, HashSet};
    /// use orapg_ir::ColumnTypeInfo;
    /// use orapg_semantic::MetadataIndex;
    ///
    /// let mut columns = HashMap::new();
    /// columns.insert("ename".to_string(), ColumnTypeInfo::builtin("VARCHAR2"));
    /// let mut tables = HashMap::new();
    /// tables.insert("hr.employees".to_string(), columns);
    ///
    /// let index = MetadataIndex::new(
    ///     tables, HashMap::new(), HashSet::new(), HashMap::new(), HashMap::new(), HashSet::new(),
    /// );
    /// assert_eq!(
    ///     index.get_column_type("HR.Employees", "ENAME"),
    ///     index.get_column_type("hr.employees", "ename"),
    /// );
    /// ```
    pub fn get_column_type(&self, qualified_table: &str, column: &str) -> Option<&ColumnTypeInfo> {
        self.table_columns
            .get(&normalize(qualified_table))?
            .get(&normalize(column))
    }

    /// Whether a table is known
    pub fn has_table(&self, qualified_table: &str) -> bool {
        self.table_columns.contains_key(&normalize(qualified_table))
    }

    /// Whether an object type declares a method
    pub fn has_type_method(&self, qualified_type: &str, method: &str) -> bool {
        self.type_methods
            .get(&normalize(qualified_type))
            .is_some_and(|methods| methods.contains(&normalize(method)))
    }

    /// Whether `schema.package.function` is a packaged routine
    pub fn is_package_function(&self, qualified_function: &str) -> bool {
        self.package_functions.contains(&normalize(qualified_function))
    }

    /// Resolve a synonym visible from `schema`
    ///
    /// The schema's own synonyms are consulted first, then public synonyms.
    pub fn resolve_synonym(&self, schema: &str, name: &str) -> Option<&str> {
        let name = normalize(name);
        self.synonyms
            .get(&normalize(schema))
            .and_then(|entries| entries.get(&name))
            .or_else(|| {
                self.synonyms
                    .get(PUBLIC_SCHEMA)
                    .and_then(|entries| entries.get(&name))
            })
            .map(String::as_str)
    }

    /// Get the declared type name of an object type field
    pub fn get_field_type(&self, qualified_type: &str, field: &str) -> Option<&str> {
        self.type_field_types
            .get(&normalize(qualified_type))?
            .get(&normalize(field))
            .map(String::as_str)
    }

    pub fn is_object_type(&self, qualified_type: &str) -> bool {
        self.object_type_names.contains(&normalize(qualified_type))
    }

    /// All fields of an object type (field name → type name)
    pub fn get_type_fields(&self, qualified_type: &str) -> Option<&HashMap<String, String>> {
        self.type_field_types.get(&normalize(qualified_type))
    }

    pub fn table_count(&self) -> usize {
        self.table_columns.len()
    }

    pub fn all_table_columns(&self) -> &HashMap<String, HashMap<String, ColumnTypeInfo>> {
        &self.table_columns
    }

    pub fn all_type_methods(&self) -> &HashMap<String, HashSet<String>> {
        &self.type_methods
    }

    pub fn all_package_functions(&self) -> &HashSet<String> {
        &self.package_functions
    }

    pub fn all_synonyms(&self) -> &HashMap<String, HashMap<String, String>> {
        &self.synonyms
    }

    pub fn all_type_fields(&self) -> &HashMap<String, HashMap<String, String>> {
        &self.type_field_types
    }

    pub fn all_object_type_names(&self) -> &HashSet<String> {
        &self.object_type_names
    }

    /// Count the entries of every lookup table
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            tables: self.table_columns.len(),
            columns: self.table_columns.values().map(HashMap::len).sum(),
            types_with_methods: self.type_methods.len(),
            package_functions: self.package_functions.len(),
            synonym_schemas: self.synonyms.len(),
            synonyms: self.synonyms.values().map(HashMap::len).sum(),
            object_types: self.object_type_names.len(),
        }
    }
}

fn lowercase_keys<V>(map: HashMap<String, V>) -> HashMap<String, V> {
    map.into_iter().map(|(k, v)| (normalize(&k), v)).collect()
}
