// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog trait for Oracle metadata
//!
//! This module defines the async Catalog trait the metadata index builder
//! reads from.

use crate::error::CatalogResult;
use crate::metadata::{
    FunctionMetadata, ObjectTypeMetadata, SynonymMetadata, TableMetadata, TypeMethodMetadata,
};

/// Catalog trait for Oracle metadata
///
/// Implementations may read from a live data dictionary, from an exported
/// snapshot, or from an in-memory fixture. Each listing returns records for
/// every schema the catalog knows; callers filter to the schemas they need.
///
/// # Examples
///
/// ```rust,ignore
/// use orapg_catalog::{Catalog, CatalogError};
///
/// async fn hr_tables(catalog: &impl Catalog) -> Result<Vec<String>, CatalogError> {
///     let tables = catalog.list_tables().await?;
///     Ok(tables.into_iter()
///         .filter(|t| t.schema.eq_ignore_ascii_case("hr"))
///         .map(|t| t.name)
///         .collect())
/// }
/// ```
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// List all tables with their columns
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::QueryFailed` if the records cannot be read.
    async fn list_tables(&self) -> CatalogResult<Vec<TableMetadata>>;

    /// List all methods declared on object types
    async fn list_type_methods(&self) -> CatalogResult<Vec<TypeMethodMetadata>>;

    /// List all standalone and packaged routines
    async fn list_functions(&self) -> CatalogResult<Vec<FunctionMetadata>>;

    /// List all synonyms, including PUBLIC synonyms
    async fn list_synonyms(&self) -> CatalogResult<Vec<SynonymMetadata>>;

    /// List all object types with their attributes
    ///
    /// Catalogs that do not track object types return an empty list.
    async fn list_object_types(&self) -> CatalogResult<Vec<ObjectTypeMetadata>> {
        Ok(Vec::new())
    }
}
