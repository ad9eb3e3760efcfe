// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Column type information
//!
//! The metadata index stores one [`ColumnTypeInfo`] per table column. Built-in
//! Oracle types carry no owner; user-defined types (object types, collections)
//! carry the schema that owns them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a table column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnTypeInfo {
    type_name: String,
    type_owner: Option<String>,
}

impl ColumnTypeInfo {
    /// Create type information for a column
    ///
    /// # Examples
    ///
    /// ```
    /// use orapg_ir::ColumnTypeInfo;
    ///
    /// let builtin = ColumnTypeInfo::new("VARCHAR2", None);
    /// assert!(!builtin.is_custom_type());
    ///
    /// let custom = ColumnTypeInfo::new("LANGY_TYPE", Some("hr".to_string()));
    /// assert_eq!(custom.qualified_type(), "hr.LANGY_TYPE");
    /// ```
    pub fn new(type_name: impl Into<String>, type_owner: Option<String>) -> Self {
        Self {
            type_name: type_name.into(),
            type_owner,
        }
    }

    /// Shorthand for a built-in type with no owner
    pub fn builtin(type_name: impl Into<String>) -> Self {
        Self::new(type_name, None)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn type_owner(&self) -> Option<&str> {
        self.type_owner.as_deref()
    }

    /// `owner.type_name` when an owner is present, otherwise the bare type name
    pub fn qualified_type(&self) -> String {
        match self.type_owner.as_deref() {
            Some(owner) if !owner.is_empty() => format!("{}.{}", owner, self.type_name),
            _ => self.type_name.clone(),
        }
    }

    /// Whether this is a user-defined type (owner present and non-empty)
    pub fn is_custom_type(&self) -> bool {
        self.type_owner.as_deref().is_some_and(|owner| !owner.is_empty())
    }
}

impl fmt::Display for ColumnTypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_owner_is_not_custom() {
        let info = ColumnTypeInfo::new("NUMBER", Some(String::new()));
        assert!(!info.is_custom_type());
        assert_eq!(info.qualified_type(), "NUMBER");
    }

    #[test]
    fn test_custom_type_qualified() {
        let info = ColumnTypeInfo::new("address_type", Some("hr".to_string()));
        assert!(info.is_custom_type());
        assert_eq!(info.qualified_type(), "hr.address_type");
        assert_eq!(info.to_string(), "hr.address_type");
    }
}
