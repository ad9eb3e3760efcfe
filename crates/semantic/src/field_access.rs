// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Object field access rewriting
//!
//! Oracle reads fields of object-type columns with plain dot chains
//! (`l.langy.de`). PostgreSQL needs the composite value parenthesized before
//! the field (`(l.langy).de`). [`ObjectFieldAccessTransformer`] detects such
//! chains and rewrites up to two levels of field access; deeper parts are
//! appended unchanged.
//!
//! Any chain that is not a field access on a known object-type column yields
//! `None`, leaving the identifier to other resolution logic.

use orapg_ir::names::{is_qualified, normalize, qualify};
use tracing::{debug, instrument};

use crate::context::ResolutionContext;

/// Table a dot chain starts with, and where its column part begins
struct TableResolution {
    qualified_table: String,
    start_index: usize,
}

/// Rewrites object field access chains for PostgreSQL
pub struct ObjectFieldAccessTransformer<'a> {
    context: &'a ResolutionContext,
}

impl<'a> ObjectFieldAccessTransformer<'a> {
    pub fn new(context: &'a ResolutionContext) -> Self {
        Self { context }
    }

    /// Rewrite `table.column.field[.field...]`
    ///
    /// Identifier text keeps its original case; only parentheses are added.
    ///
    /// # Returns
    ///
    /// The rewritten chain, or `None` when the chain is not a field access on
    /// a known object-type column.
    #[instrument(skip(self), level = "trace")]
    pub fn transform(&self, chain: &str) -> Option<String> {
        if chain.trim().is_empty() {
            return None;
        }

        let parts: Vec<&str> = chain.split('.').collect();
        if parts.len() < 3 || parts.iter().any(|p| p.is_empty()) {
            return None;
        }

        let resolution = self.resolve_table(&parts)?;
        let column = *parts.get(resolution.start_index)?;
        let column_type = self
            .context
            .get_column_type(&resolution.qualified_table, column)?;

        let qualified_column_type = self.context.qualify_type_name(&column_type.qualified_type());
        if !self.context.is_object_type(&qualified_column_type) {
            return None;
        }

        if resolution.start_index + 1 >= parts.len() {
            return None;
        }

        self.rewrite_fields(&parts, resolution.start_index, &qualified_column_type)
    }

    /// Alias, then synonym, then `schema.table`, then a current-schema table
    fn resolve_table(&self, parts: &[&str]) -> Option<TableResolution> {
        let first = parts[0];

        if let Some(table) = self.context.resolve_alias(first) {
            let qualified_table = if is_qualified(table) {
                normalize(table)
            } else {
                qualify(self.context.current_schema(), table)
            };
            return Some(TableResolution {
                qualified_table,
                start_index: 1,
            });
        }

        if let Some(target) = self.context.resolve_synonym(first) {
            return Some(TableResolution {
                qualified_table: normalize(target),
                start_index: 1,
            });
        }

        let schema_table = qualify(first, parts[1]);
        if self.context.index().has_table(&schema_table) {
            return Some(TableResolution {
                qualified_table: schema_table,
                start_index: 2,
            });
        }

        let current_table = qualify(self.context.current_schema(), first);
        if self.context.index().has_table(&current_table) {
            return Some(TableResolution {
                qualified_table: current_table,
                start_index: 1,
            });
        }

        None
    }

    fn rewrite_fields(&self, parts: &[&str], start_index: usize, column_type: &str) -> Option<String> {
        let base = parts[..=start_index].join(".");

        let field1 = parts[start_index + 1];
        let Some(field1_type) = self.context.get_field_type(column_type, field1) else {
            debug!(field = %field1, object_type = %column_type, "Unknown object type field");
            return None;
        };

        let mut result = format!("({}).{}", base, field1);
        let rest = &parts[start_index + 2..];
        if rest.is_empty() {
            return Some(result);
        }

        let field1_type = self.context.qualify_type_name(field1_type);
        if !self.context.is_object_type(&field1_type) {
            append_parts(&mut result, rest);
            return Some(result);
        }

        let field2 = rest[0];
        if self.context.get_field_type(&field1_type, field2).is_none() {
            debug!(field = %field2, object_type = %field1_type, "Unknown nested field");
            append_parts(&mut result, rest);
            return Some(result);
        }

        let mut result = format!("({}).{}", result, field2);
        append_parts(&mut result, &rest[1..]);
        Some(result)
    }
}

fn append_parts(result: &mut String, parts: &[&str]) {
    for part in parts {
        result.push('.');
        result.push_str(part);
    }
}
