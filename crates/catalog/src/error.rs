// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for Catalog operations
//!
//! This module defines the error types used throughout the catalog layer.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while reading Oracle catalog records
#[derive(Debug, Error, Clone, Serialize)]
pub enum CatalogError {
    /// A data dictionary listing could not be read
    #[error("Catalog query failed: {0}")]
    QueryFailed(String),

    /// Snapshot text is not valid JSON or YAML for the record types
    #[error("Malformed catalog snapshot: {0}")]
    SerializationError(String),

    /// The catalog cannot list this kind of record
    #[error("Catalog listing not supported: {0}")]
    NotSupported(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for CatalogError {
    fn from(err: serde_yaml::Error) -> Self {
        CatalogError::SerializationError(err.to_string())
    }
}
