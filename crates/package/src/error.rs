// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for package handling

use thiserror::Error;

/// Result type alias for package operations
pub type PackageResult<T> = Result<T, PackageError>;

/// Errors that can occur while handling package bodies
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PackageError {
    /// A routine segment cannot be applied to the body text
    #[error("Invalid segment '{name}' [{start}-{end}]: {reason}")]
    InvalidSegment {
        name: String,
        start: usize,
        end: usize,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_segment() {
        let err = PackageError::InvalidSegment {
            name: "calc".to_string(),
            start: 40,
            end: 10,
            reason: "end before start".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("calc"));
        assert!(msg.contains("40-10"));
        assert!(msg.contains("end before start"));
    }
}
