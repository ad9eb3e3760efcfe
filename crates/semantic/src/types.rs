// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Type evaluator seam
//!
//! The resolution context hands a type evaluator to the rendering layer,
//! which asks it for expression types (for example to choose between
//! numeric and date arithmetic). Evaluators that need the current query's
//! table aliases expose the [`AliasAware`] capability; the context pushes
//! alias changes to it whenever the alias map changes.

use std::collections::HashMap;
use std::sync::Arc;

use orapg_ir::names::{is_qualified, normalize, qualify};
use orapg_ir::ColumnTypeInfo;
use tracing::trace;

use crate::index::MetadataIndex;

/// Capability of evaluators that track the current query's table aliases
pub trait AliasAware {
    /// Replace the known aliases (lowercase alias → lowercase table name)
    fn set_table_aliases(&mut self, aliases: &HashMap<String, String>);
}

/// Expression type evaluator used during one unit's transformation
pub trait TypeEvaluator: Send {
    /// Drop memoized results
    fn clear_cache(&mut self);

    /// Alias tracking capability, if this evaluator has one
    fn alias_aware(&mut self) -> Option<&mut dyn AliasAware> {
        None
    }
}

/// Evaluator without capabilities
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTypeEvaluator;

impl TypeEvaluator for NoopTypeEvaluator {
    fn clear_cache(&mut self) {}
}

/// Evaluator resolving column references against the metadata index
///
/// A qualifier is resolved the same way the field-access rewrite resolves
/// a leading identifier: alias first, then synonym, then a table of the
/// current schema. Results are memoized until the aliases change.
#[derive(Debug, Clone)]
pub struct SimpleTypeEvaluator {
    current_schema: String,
    index: Arc<MetadataIndex>,
    aliases: HashMap<String, String>,
    cache: HashMap<(String, String), Option<ColumnTypeInfo>>,
}

impl SimpleTypeEvaluator {
    pub fn new(current_schema: impl Into<String>, index: Arc<MetadataIndex>) -> Self {
        Self {
            current_schema: normalize(&current_schema.into()),
            index,
            aliases: HashMap::new(),
            cache: HashMap::new(),
        }
    }

    /// Type of `qualifier.column`, where the qualifier is an alias, a
    /// synonym, a `schema.table` or a table of the current schema
    pub fn column_type(&mut self, qualifier: &str, column: &str) -> Option<ColumnTypeInfo> {
        let key = (normalize(qualifier), normalize(column));
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let resolved = self
            .resolve_table(&key.0)
            .and_then(|table| self.index.get_column_type(&table, &key.1).cloned());
        trace!(qualifier = %key.0, column = %key.1, found = resolved.is_some(), "Column type evaluated");

        self.cache.insert(key, resolved.clone());
        resolved
    }

    pub fn table_aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    fn resolve_table(&self, qualifier: &str) -> Option<String> {
        if let Some(table) = self.aliases.get(qualifier) {
            return Some(self.qualify_table(table));
        }
        if is_qualified(qualifier) {
            return Some(qualifier.to_string());
        }
        if let Some(target) = self.index.resolve_synonym(&self.current_schema, qualifier) {
            return Some(target.to_string());
        }
        let table = qualify(&self.current_schema, qualifier);
        self.index.has_table(&table).then_some(table)
    }

    fn qualify_table(&self, table: &str) -> String {
        if is_qualified(table) {
            normalize(table)
        } else {
            qualify(&self.current_schema, table)
        }
    }
}

impl TypeEvaluator for SimpleTypeEvaluator {
    fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn alias_aware(&mut self) -> Option<&mut dyn AliasAware> {
        Some(self)
    }
}

impl AliasAware for SimpleTypeEvaluator {
    fn set_table_aliases(&mut self, aliases: &HashMap<String, String>) {
        self.aliases = aliases
            .iter()
            .map(|(alias, table)| (normalize(alias), normalize(table)))
            .collect();
        self.cache.clear();
    }
}
