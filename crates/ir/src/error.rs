// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for the data model

use thiserror::Error;

/// Result type alias for data model construction
pub type IrResult<T> = Result<T, IrError>;

/// Errors raised when a definition is built from incomplete input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IrError {
    /// A required name or type string was empty
    #[error("{what} cannot be empty")]
    EmptyField { what: &'static str },
}
