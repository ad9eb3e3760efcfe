// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog records
//!
//! This module defines the records extracted from an Oracle data dictionary:
//! tables and their columns, object type methods, package functions,
//! synonyms, and object type attributes.
//!
//! Names are kept exactly as the catalog reported them. The metadata index
//! builder lowercases them when it builds its lookup tables.

use serde::{Deserialize, Serialize};

/// Metadata for a table column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name
    pub name: String,
    /// Declared data type name (e.g. "VARCHAR2", "ADDRESS_TYPE")
    pub data_type: String,
    /// Owner of a user-defined data type, `None` for built-in types
    #[serde(default)]
    pub data_type_owner: Option<String>,
}

impl ColumnMetadata {
    /// Create a new column with a built-in data type
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            data_type_owner: None,
        }
    }

    /// Builder method: set the owner of a user-defined data type
    pub fn with_type_owner(mut self, owner: impl Into<String>) -> Self {
        self.data_type_owner = Some(owner.into());
        self
    }
}

/// Metadata for a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Owning schema
    pub schema: String,
    /// Table name
    pub name: String,
    /// Column definitions
    #[serde(default)]
    pub columns: Vec<ColumnMetadata>,
}

impl TableMetadata {
    /// Create new table metadata with builder pattern
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Builder method: add columns
    pub fn with_columns(mut self, columns: Vec<ColumnMetadata>) -> Self {
        self.columns = columns;
        self
    }

    /// Get column by name (case-insensitive)
    pub fn get_column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Whether an object type method returns a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodType {
    Function,
    Procedure,
}

/// Metadata for a method declared on an object type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMethodMetadata {
    /// Schema owning the type
    pub schema: String,
    /// Object type name
    pub type_name: String,
    /// Method name
    pub method_name: String,
    /// FUNCTION or PROCEDURE
    pub method_type: MethodType,
    /// STATIC method (not invoked on an instance)
    #[serde(default)]
    pub is_static: bool,
}

impl TypeMethodMetadata {
    /// Create a MEMBER FUNCTION method record
    pub fn new(
        schema: impl Into<String>,
        type_name: impl Into<String>,
        method_name: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            type_name: type_name.into(),
            method_name: method_name.into(),
            method_type: MethodType::Function,
            is_static: false,
        }
    }

    /// Builder method: set method type
    pub fn with_method_type(mut self, method_type: MethodType) -> Self {
        self.method_type = method_type;
        self
    }

    /// Builder method: mark as STATIC
    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// Metadata for a standalone or packaged function/procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMetadata {
    /// Owning schema
    pub schema: String,
    /// Function or procedure name
    pub object_name: String,
    /// Package containing the routine, `None` for standalone routines
    #[serde(default)]
    pub package_name: Option<String>,
}

impl FunctionMetadata {
    /// Create a standalone routine record
    pub fn new(schema: impl Into<String>, object_name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            object_name: object_name.into(),
            package_name: None,
        }
    }

    /// Builder method: place the routine inside a package
    pub fn with_package(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    /// Whether the routine lives in a package (package name present and non-empty)
    pub fn is_package_member(&self) -> bool {
        self.package_name.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Metadata for a synonym
///
/// The owner is either a schema name or `PUBLIC` for public synonyms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymMetadata {
    /// Schema owning the synonym, or "PUBLIC"
    pub owner: String,
    /// Synonym name
    pub synonym_name: String,
    /// Schema of the target object
    pub table_owner: String,
    /// Name of the target object
    pub table_name: String,
    /// Database link for remote synonyms
    #[serde(default)]
    pub db_link: Option<String>,
}

impl SynonymMetadata {
    pub fn new(
        owner: impl Into<String>,
        synonym_name: impl Into<String>,
        table_owner: impl Into<String>,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            synonym_name: synonym_name.into(),
            table_owner: table_owner.into(),
            table_name: table_name.into(),
            db_link: None,
        }
    }

    /// Builder method: set database link
    pub fn with_db_link(mut self, db_link: impl Into<String>) -> Self {
        self.db_link = Some(db_link.into());
        self
    }

    /// Target in `owner.name` form, as reported by the catalog
    pub fn qualified_target(&self) -> String {
        format!("{}.{}", self.table_owner, self.table_name)
    }

    /// Synonym in `owner.name` form, as reported by the catalog
    pub fn qualified_synonym(&self) -> String {
        format!("{}.{}", self.owner, self.synonym_name)
    }

    /// Whether the synonym points through a database link
    pub fn is_remote(&self) -> bool {
        self.db_link.as_deref().is_some_and(|l| !l.is_empty())
    }
}

/// One attribute of an object type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectTypeField {
    /// Attribute name
    pub name: String,
    /// Declared attribute type (may itself be an object type)
    pub data_type: String,
}

impl ObjectTypeField {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Metadata for a user-defined object type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectTypeMetadata {
    /// Owning schema
    pub schema: String,
    /// Type name
    pub name: String,
    /// Attributes in declaration order
    #[serde(default)]
    pub fields: Vec<ObjectTypeField>,
}

impl ObjectTypeMetadata {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Builder method: set attributes
    pub fn with_fields(mut self, fields: Vec<ObjectTypeField>) -> Self {
        self.fields = fields;
        self
    }
}
