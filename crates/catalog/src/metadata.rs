// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata types for Oracle catalog records
//!
//! This module re-exports the catalog record types from the `orapg-ir` crate.

// Re-export all metadata types from the ir crate
pub use orapg_ir::{
    ColumnMetadata, FunctionMetadata, MethodType, ObjectTypeField, ObjectTypeMetadata,
    SynonymMetadata, TableMetadata, TypeMethodMetadata,
};
