// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # orapg - Data Model
//!
//! This crate provides the data model shared by the Oracle to PostgreSQL
//! transformation layers:
//! - Catalog records (tables, columns, type methods, functions, synonyms, object types)
//! - Column type information used by the metadata index
//! - Inline PL/SQL type definitions (records, collections)
//! - Helpers for case-insensitive, schema-qualified names
//!
//! All names handed to this crate may be mixed case. Consumers normalize them
//! with [`names::normalize`] before using them as lookup keys.

pub mod error;
pub mod inline;
pub mod metadata;
pub mod names;
pub mod types;

// Re-export commonly used types
pub use error::{IrError, IrResult};
pub use inline::{ConversionStrategy, FieldDefinition, InlineTypeDefinition, TypeCategory};
pub use metadata::{
    ColumnMetadata, FunctionMetadata, MethodType, ObjectTypeField, ObjectTypeMetadata,
    SynonymMetadata, TableMetadata, TypeMethodMetadata,
};
pub use types::ColumnTypeInfo;
