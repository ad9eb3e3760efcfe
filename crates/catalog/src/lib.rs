// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # orapg - Catalog Layer
//!
//! This crate provides the catalog abstraction the transformer reads Oracle
//! metadata from. It defines the `Catalog` trait and an in-memory
//! implementation backed by a serializable snapshot.
//!
//! ## Architecture
//!
//! The catalog layer is responsible for:
//! - Listing tables with column types (including user-defined type owners)
//! - Listing object type methods and object type attributes
//! - Listing packaged and standalone routines
//! - Listing private and public synonyms
//!
//! Extraction from a live Oracle instance happens elsewhere; the result is
//! handed over as a [`CatalogSnapshot`] (JSON or YAML) or through a custom
//! [`Catalog`] implementation.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use orapg_catalog::{Catalog, CatalogError};
//!
//! async fn print_tables(catalog: &impl Catalog) -> Result<(), CatalogError> {
//!     let tables = catalog.list_tables().await?;
//!     for table in tables {
//!         println!("{}.{}", table.schema, table.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod metadata;
pub mod r#static;
pub mod r#trait;

// Re-exports
pub use error::{CatalogError, CatalogResult};
pub use metadata::{
    ColumnMetadata, FunctionMetadata, MethodType, ObjectTypeField, ObjectTypeMetadata,
    SynonymMetadata, TableMetadata, TypeMethodMetadata,
};
pub use r#static::{CatalogSnapshot, StaticCatalog};
pub use r#trait::Catalog;
