// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Package segments
//!
//! Byte ranges of the FUNCTION and PROCEDURE definitions inside a package
//! body, in source order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Location of one routine inside a package body
///
/// All positions are byte offsets into the body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSegment {
    /// Routine name
    pub name: String,
    /// Start of the FUNCTION/PROCEDURE keyword
    pub start_pos: usize,
    /// Position after the final `;`
    pub end_pos: usize,
    /// Position after the IS/AS keyword
    pub body_start_pos: usize,
    /// Position before the final END keyword
    pub body_end_pos: usize,
    /// `true` for FUNCTION, `false` for PROCEDURE
    pub is_function: bool,
}

impl FunctionSegment {
    pub fn new(
        name: impl Into<String>,
        start_pos: usize,
        end_pos: usize,
        body_start_pos: usize,
        body_end_pos: usize,
        is_function: bool,
    ) -> Self {
        Self {
            name: name.into(),
            start_pos,
            end_pos,
            body_start_pos,
            body_end_pos,
            is_function,
        }
    }

    pub fn is_procedure(&self) -> bool {
        !self.is_function
    }

    /// Length of the whole definition (zero for a malformed segment)
    pub fn len(&self) -> usize {
        self.end_pos.saturating_sub(self.start_pos)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the routine body between IS/AS and END
    pub fn body_len(&self) -> usize {
        self.body_end_pos.saturating_sub(self.body_start_pos)
    }
}

impl fmt::Display for FunctionSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}-{}, body: {}-{}]",
            if self.is_function { "FUNCTION" } else { "PROCEDURE" },
            self.name,
            self.start_pos,
            self.end_pos,
            self.body_start_pos,
            self.body_end_pos
        )
    }
}

/// Ordered list of routine segments found in a package body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSegments {
    functions: Vec<FunctionSegment>,
}

impl PackageSegments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment; segments must be added in source order
    pub fn add_function(&mut self, segment: FunctionSegment) {
        self.functions.push(segment);
    }

    pub fn functions(&self) -> &[FunctionSegment] {
        &self.functions
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl FromIterator<FunctionSegment> for PackageSegments {
    fn from_iter<I: IntoIterator<Item = FunctionSegment>>(iter: I) -> Self {
        Self {
            functions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_lengths() {
        let seg = FunctionSegment::new("calc", 100, 250, 130, 240, true);
        assert_eq!(seg.len(), 150);
        assert_eq!(seg.body_len(), 110);
        assert!(!seg.is_procedure());
        assert!(!seg.is_empty());
    }

    #[test]
    fn test_malformed_segment_length_is_zero() {
        let seg = FunctionSegment::new("bad", 50, 10, 40, 20, false);
        assert_eq!(seg.len(), 0);
        assert_eq!(seg.body_len(), 0);
    }

    #[test]
    fn test_display() {
        let seg = FunctionSegment::new("log_it", 0, 80, 20, 70, false);
        assert_eq!(seg.to_string(), "PROCEDURE log_it [0-80, body: 20-70]");
    }

    #[test]
    fn test_collect_segments() {
        let segments: PackageSegments = vec![
            FunctionSegment::new("a", 0, 10, 2, 8, true),
            FunctionSegment::new("b", 20, 30, 22, 28, false),
        ]
        .into_iter()
        .collect();
        assert_eq!(segments.function_count(), 2);
        assert_eq!(segments.functions()[1].name, "b");
    }
}
