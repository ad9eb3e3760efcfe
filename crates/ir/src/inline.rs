// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Inline PL/SQL type definitions
//!
//! PL/SQL lets a block or package declare its own types (`TYPE t IS RECORD`,
//! `TABLE OF`, `VARRAY`, `INDEX BY`, `%ROWTYPE`, `%TYPE`). PostgreSQL has no
//! block-local types, so each definition records how it is carried over.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// Kind of inline type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCategory {
    /// `TYPE t IS RECORD (...)`
    Record,
    /// `TYPE t IS TABLE OF ...`
    TableOf,
    /// `TYPE t IS VARRAY(n) OF ...`
    Varray,
    /// `TYPE t IS TABLE OF ... INDEX BY ...`
    IndexBy,
    /// `table%ROWTYPE`
    Rowtype,
    /// `variable%TYPE`
    TypeReference,
}

/// How an inline type is represented in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConversionStrategy {
    Jsonb,
    Array,
    Composite,
}

/// One field of a RECORD type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDefinition {
    field_name: String,
    oracle_type: String,
    postgres_type: String,
}

impl FieldDefinition {
    /// Create a field definition; none of the three strings may be blank
    pub fn new(
        field_name: impl Into<String>,
        oracle_type: impl Into<String>,
        postgres_type: impl Into<String>,
    ) -> IrResult<Self> {
        let field_name = field_name.into();
        let oracle_type = oracle_type.into();
        let postgres_type = postgres_type.into();

        if field_name.trim().is_empty() {
            return Err(IrError::EmptyField { what: "Field name" });
        }
        if oracle_type.trim().is_empty() {
            return Err(IrError::EmptyField { what: "Oracle type" });
        }
        if postgres_type.trim().is_empty() {
            return Err(IrError::EmptyField {
                what: "PostgreSQL type",
            });
        }

        Ok(Self {
            field_name,
            oracle_type,
            postgres_type,
        })
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn oracle_type(&self) -> &str {
        &self.oracle_type
    }

    pub fn postgres_type(&self) -> &str {
        &self.postgres_type
    }
}

/// An inline type declared in a block or package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineTypeDefinition {
    type_name: String,
    category: TypeCategory,
    element_type: Option<String>,
    fields: Option<Vec<FieldDefinition>>,
    strategy: ConversionStrategy,
    size_limit: Option<u32>,
    index_key_type: Option<String>,
}

impl InlineTypeDefinition {
    /// Create a definition with the given name, category and strategy
    ///
    /// # Examples
    ///
    /// ```
    /// use orapg_ir::{ConversionStrategy, InlineTypeDefinition, TypeCategory};
    ///
    /// let list = InlineTypeDefinition::new("num_list_t", TypeCategory::TableOf, ConversionStrategy::Jsonb)
    ///     .unwrap()
    ///     .with_element_type("NUMBER");
    /// assert_eq!(list.postgres_type(), "jsonb");
    /// assert_eq!(list.initializer(), "'[]'::jsonb");
    /// ```
    pub fn new(
        type_name: impl Into<String>,
        category: TypeCategory,
        strategy: ConversionStrategy,
    ) -> IrResult<Self> {
        let type_name = type_name.into();
        if type_name.trim().is_empty() {
            return Err(IrError::EmptyField { what: "Type name" });
        }

        Ok(Self {
            type_name,
            category,
            element_type: None,
            fields: None,
            strategy,
            size_limit: None,
            index_key_type: None,
        })
    }

    /// Builder method: element type of a collection
    pub fn with_element_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }

    /// Builder method: fields of a record
    pub fn with_fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Builder method: VARRAY size limit
    pub fn with_size_limit(mut self, limit: u32) -> Self {
        self.size_limit = Some(limit);
        self
    }

    /// Builder method: INDEX BY key type
    pub fn with_index_key_type(mut self, key_type: impl Into<String>) -> Self {
        self.index_key_type = Some(key_type.into());
        self
    }

    /// PostgreSQL type used for variables of this type
    pub fn postgres_type(&self) -> String {
        match self.strategy {
            ConversionStrategy::Jsonb => "jsonb".to_string(),
            ConversionStrategy::Array => match &self.element_type {
                Some(element) => format!("{}[]", element),
                None => "jsonb".to_string(),
            },
            ConversionStrategy::Composite => self.type_name.clone(),
        }
    }

    /// Initial value used when a variable of this type is declared
    pub fn initializer(&self) -> &'static str {
        match self.strategy {
            ConversionStrategy::Jsonb => match self.category {
                TypeCategory::TableOf | TypeCategory::Varray => "'[]'::jsonb",
                TypeCategory::Record
                | TypeCategory::IndexBy
                | TypeCategory::Rowtype
                | TypeCategory::TypeReference => "'{}'::jsonb",
            },
            ConversionStrategy::Array => "ARRAY[]",
            ConversionStrategy::Composite => "'{}'::jsonb",
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(
            self.category,
            TypeCategory::TableOf | TypeCategory::Varray | TypeCategory::IndexBy
        )
    }

    pub fn is_record(&self) -> bool {
        matches!(self.category, TypeCategory::Record | TypeCategory::Rowtype)
    }

    /// TABLE OF and VARRAY are indexed by position
    pub fn is_indexed_collection(&self) -> bool {
        matches!(self.category, TypeCategory::TableOf | TypeCategory::Varray)
    }

    pub fn is_associative_array(&self) -> bool {
        self.category == TypeCategory::IndexBy
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn category(&self) -> TypeCategory {
        self.category
    }

    pub fn element_type(&self) -> Option<&str> {
        self.element_type.as_deref()
    }

    pub fn fields(&self) -> Option<&[FieldDefinition]> {
        self.fields.as_deref()
    }

    pub fn strategy(&self) -> ConversionStrategy {
        self.strategy
    }

    pub fn size_limit(&self) -> Option<u32> {
        self.size_limit
    }

    pub fn index_key_type(&self) -> Option<&str> {
        self.index_key_type.as_deref()
    }

    /// Find a record field by name (case-insensitive)
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields
            .as_deref()?
            .iter()
            .find(|f| f.field_name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> InlineTypeDefinition {
        InlineTypeDefinition::new("salary_range_t", TypeCategory::Record, ConversionStrategy::Jsonb)
            .unwrap()
            .with_fields(vec![
                FieldDefinition::new("min_sal", "NUMBER", "numeric").unwrap(),
                FieldDefinition::new("max_sal", "NUMBER", "numeric").unwrap(),
            ])
    }

    #[test]
    fn test_field_definition_rejects_blank_parts() {
        assert_eq!(
            FieldDefinition::new(" ", "NUMBER", "numeric"),
            Err(IrError::EmptyField { what: "Field name" })
        );
        assert!(FieldDefinition::new("f", "", "numeric").is_err());
        assert!(FieldDefinition::new("f", "NUMBER", "").is_err());
    }

    #[test]
    fn test_type_name_required() {
        let result = InlineTypeDefinition::new("", TypeCategory::Record, ConversionStrategy::Jsonb);
        assert!(matches!(result, Err(IrError::EmptyField { .. })));
    }

    #[test]
    fn test_record_classification() {
        let rec = record();
        assert!(rec.is_record());
        assert!(!rec.is_collection());
        assert_eq!(rec.initializer(), "'{}'::jsonb");
        assert_eq!(rec.field("MIN_SAL").unwrap().postgres_type(), "numeric");
        assert!(rec.field("avg_sal").is_none());
    }

    #[test]
    fn test_collection_classification() {
        let varray = InlineTypeDefinition::new("codes_t", TypeCategory::Varray, ConversionStrategy::Jsonb)
            .unwrap()
            .with_element_type("VARCHAR2")
            .with_size_limit(10);
        assert!(varray.is_collection());
        assert!(varray.is_indexed_collection());
        assert!(!varray.is_associative_array());
        assert_eq!(varray.size_limit(), Some(10));

        let map = InlineTypeDefinition::new("map_t", TypeCategory::IndexBy, ConversionStrategy::Jsonb)
            .unwrap()
            .with_element_type("NUMBER")
            .with_index_key_type("VARCHAR2");
        assert!(map.is_associative_array());
        assert!(!map.is_indexed_collection());
        assert_eq!(map.initializer(), "'{}'::jsonb");
    }

    #[test]
    fn test_array_strategy() {
        let list = InlineTypeDefinition::new("nums_t", TypeCategory::TableOf, ConversionStrategy::Array)
            .unwrap()
            .with_element_type("numeric");
        assert_eq!(list.postgres_type(), "numeric[]");
        assert_eq!(list.initializer(), "ARRAY[]");
    }

    #[test]
    fn test_composite_strategy_uses_type_name() {
        let rec = InlineTypeDefinition::new("emp_rec_t", TypeCategory::Record, ConversionStrategy::Composite)
            .unwrap();
        assert_eq!(rec.postgres_type(), "emp_rec_t");
    }
}
