// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Package body reduction
//!
//! Large package bodies are dominated by routine implementations, while
//! package variable and type extraction only needs the declarations. The
//! reducer splices the routine definitions out of the body text so the
//! declaration parse stays small.

use tracing::debug;

use crate::error::{PackageError, PackageResult};
use crate::segments::{FunctionSegment, PackageSegments};

/// Removes routine definitions from package body text
pub struct PackageBodyReducer;

impl PackageBodyReducer {
    /// Copy everything outside the given segments, in order
    ///
    /// Segments must be ordered, non-overlapping, within the body and on
    /// UTF-8 character boundaries. With no segments the body is returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `PackageError::InvalidSegment` for a segment that violates
    /// those conditions.
    pub fn remove_all_functions(body: &str, segments: &PackageSegments) -> PackageResult<String> {
        debug!(
            body_len = body.len(),
            functions = segments.function_count(),
            "Reducing package body"
        );

        if segments.is_empty() {
            debug!("No functions to remove, returning original");
            return Ok(body.to_string());
        }

        let mut reduced = String::with_capacity(body.len());
        let mut current_pos = 0;

        for segment in segments.functions() {
            Self::check_segment(body, segment, current_pos)?;
            reduced.push_str(&body[current_pos..segment.start_pos]);
            current_pos = segment.end_pos;
        }
        reduced.push_str(&body[current_pos..]);

        debug!(
            from = body.len(),
            to = reduced.len(),
            reduction = %format!("{:.1}%", Self::reduction_percentage(body.len(), reduced.len())),
            "Reduced package body"
        );

        Ok(reduced)
    }

    /// Body length left after removing every segment
    pub fn estimate_reduced_size(body_len: usize, segments: &PackageSegments) -> usize {
        let removed: usize = segments.functions().iter().map(FunctionSegment::len).sum();
        body_len.saturating_sub(removed)
    }

    /// Share of the original size that was removed, in percent
    pub fn reduction_percentage(original_size: usize, reduced_size: usize) -> f64 {
        if original_size == 0 {
            return 0.0;
        }
        100.0 * (1.0 - reduced_size as f64 / original_size as f64)
    }

    fn check_segment(body: &str, segment: &FunctionSegment, current_pos: usize) -> PackageResult<()> {
        let reason = if segment.end_pos < segment.start_pos {
            Some("end before start")
        } else if segment.start_pos < current_pos {
            Some("overlaps or precedes the previous segment")
        } else if segment.end_pos > body.len() {
            Some("extends beyond the body")
        } else if !body.is_char_boundary(segment.start_pos) || !body.is_char_boundary(segment.end_pos) {
            Some("not on a character boundary")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(PackageError::InvalidSegment {
                name: segment.name.clone(),
                start: segment.start_pos,
                end: segment.end_pos,
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(ranges: &[(usize, usize)]) -> PackageSegments {
        ranges
            .iter()
            .enumerate()
            .map(|(i, &(start, end))| FunctionSegment::new(format!("f{}", i), start, end, start, end, true))
            .collect()
    }

    #[test]
    fn test_empty_segments_return_body_unchanged() {
        let body = "CREATE PACKAGE BODY p AS\n  g NUMBER := 1;\nEND p;";
        let reduced = PackageBodyReducer::remove_all_functions(body, &PackageSegments::new()).unwrap();
        assert_eq!(reduced, body);
    }

    #[test]
    fn test_removes_multiple_segments() {
        let body = "AAAxxxBBByyyCCC";
        let reduced = PackageBodyReducer::remove_all_functions(body, &segments(&[(3, 6), (9, 12)])).unwrap();
        assert_eq!(reduced, "AAABBBCCC");
    }

    #[test]
    fn test_segment_at_edges() {
        let body = "xxxBBByyy";
        let reduced = PackageBodyReducer::remove_all_functions(body, &segments(&[(0, 3), (6, 9)])).unwrap();
        assert_eq!(reduced, "BBB");
    }

    #[test]
    fn test_adjacent_segments() {
        let body = "AAxxyyBB";
        let reduced = PackageBodyReducer::remove_all_functions(body, &segments(&[(2, 4), (4, 6)])).unwrap();
        assert_eq!(reduced, "AABB");
    }

    #[test]
    fn test_rejects_overlapping_segments() {
        let result = PackageBodyReducer::remove_all_functions("0123456789", &segments(&[(2, 6), (4, 8)]));
        assert!(matches!(result, Err(PackageError::InvalidSegment { ref name, .. }) if name == "f1"));
    }

    #[test]
    fn test_rejects_out_of_bounds_segment() {
        let result = PackageBodyReducer::remove_all_functions("short", &segments(&[(2, 50)]));
        assert!(matches!(result, Err(PackageError::InvalidSegment { .. })));
    }

    #[test]
    fn test_rejects_reversed_segment() {
        let result = PackageBodyReducer::remove_all_functions("0123456789", &segments(&[(6, 2)]));
        assert!(matches!(result, Err(PackageError::InvalidSegment { .. })));
    }

    #[test]
    fn test_rejects_split_character() {
        // 'ä' occupies bytes 1..3
        let result = PackageBodyReducer::remove_all_functions("xäy", &segments(&[(2, 3)]));
        assert!(matches!(result, Err(PackageError::InvalidSegment { .. })));
    }

    #[test]
    fn test_multibyte_text_outside_segments_kept() {
        let body = "ä;xx;ö";
        let reduced = PackageBodyReducer::remove_all_functions(body, &segments(&[(3, 6)])).unwrap();
        assert_eq!(reduced, "ä;ö");
    }

    #[test]
    fn test_estimate_reduced_size() {
        let segs = segments(&[(3, 6), (9, 12)]);
        assert_eq!(PackageBodyReducer::estimate_reduced_size(15, &segs), 9);
        assert_eq!(PackageBodyReducer::estimate_reduced_size(4, &segs), 0);
    }

    #[test]
    fn test_reduction_percentage() {
        assert_eq!(PackageBodyReducer::reduction_percentage(0, 0), 0.0);
        assert!((PackageBodyReducer::reduction_percentage(200, 50) - 75.0).abs() < f64::EPSILON);
    }
}
