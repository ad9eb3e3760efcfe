// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Qualified name helpers
//!
//! Unquoted Oracle identifiers are case-insensitive, so every lookup key in the
//! metadata index is lowercase. These helpers keep that normalization in one place.

/// Schema that holds public synonyms and public object types
pub const PUBLIC_SCHEMA: &str = "public";

/// Schema that holds Oracle built-in object types
pub const SYS_SCHEMA: &str = "sys";

/// Lowercase a name for use as a lookup key
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
}

/// Build a lowercase `schema.name` key
///
/// # Examples
///
/// ```
/// use orapg_ir::names::qualify;
///
/// assert_eq!(qualify("HR", "Employees"), "hr.employees");
/// ```
pub fn qualify(schema: &str, name: &str) -> String {
    format!("{}.{}", schema.to_lowercase(), name.to_lowercase())
}

/// Whether a name already carries a schema (or package) qualifier
pub fn is_qualified(name: &str) -> bool {
    name.contains('.')
}
