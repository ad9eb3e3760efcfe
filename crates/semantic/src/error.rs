// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Error types for semantic resolution
//!
//! Lookups that miss are not errors; they return `None` or `false`. The
//! variants here signal misuse by the calling traversal or a failing
//! catalog.

use orapg_catalog::CatalogError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for semantic operations
pub type SemanticResult<T> = Result<T, SemanticError>;

/// Errors that can occur during semantic resolution
#[derive(Debug, Error, Clone)]
pub enum SemanticError {
    /// Pop requested on an empty variable scope stack
    #[error("Cannot pop variable scope: scope stack is empty")]
    ScopeStackEmpty,

    /// Variable registered while no variable scope is active
    #[error("Cannot register variable '{0}': no active variable scope")]
    NoActiveScope(String),

    /// A required argument was empty or otherwise unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading catalog records failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Session configuration rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
