// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Variable scopes
//!
//! PL/SQL blocks nest, and a variable declared in an inner block shadows one
//! of the same name in an outer block. The [`VariableScopeStack`] tracks the
//! declarations of the blocks enclosing the current traversal position so
//! an identifier can be classified exactly as a local variable rather than
//! guessed from its shape.

use std::collections::HashMap;
use std::fmt;

use orapg_ir::names::normalize;
use orapg_ir::{InlineTypeDefinition, TypeCategory};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{SemanticError, SemanticResult};

/// A declared local variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDefinition {
    pub variable_name: String,
    pub oracle_type: String,
    pub postgres_type: String,
    #[serde(default)]
    pub is_constant: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    /// Inline type the variable was declared with, if any
    #[serde(default)]
    pub inline_type: Option<InlineTypeDefinition>,
}

impl VariableDefinition {
    /// Create a variable definition
    ///
    /// # Examples
    ///
    /// ```
    /// use orapg_semantic::VariableDefinition;
    ///
    /// let v = VariableDefinition::new("v_total", "NUMBER", "numeric").with_default("0");
    /// assert_eq!(v.default_value.as_deref(), Some("0"));
    /// assert!(!v.has_inline_type());
    /// ```
    pub fn new(
        variable_name: impl Into<String>,
        oracle_type: impl Into<String>,
        postgres_type: impl Into<String>,
    ) -> Self {
        Self {
            variable_name: variable_name.into(),
            oracle_type: oracle_type.into(),
            postgres_type: postgres_type.into(),
            is_constant: false,
            default_value: None,
            inline_type: None,
        }
    }

    /// Builder method: mark as CONSTANT
    pub fn constant(mut self) -> Self {
        self.is_constant = true;
        self
    }

    /// Builder method: set the default expression
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Builder method: attach the inline type of the declaration
    pub fn with_inline_type(mut self, inline_type: InlineTypeDefinition) -> Self {
        self.inline_type = Some(inline_type);
        self
    }

    pub fn has_inline_type(&self) -> bool {
        self.inline_type.is_some()
    }

    /// Whether the variable is of a RECORD inline type
    pub fn is_record(&self) -> bool {
        self.inline_type
            .as_ref()
            .is_some_and(|t| t.category() == TypeCategory::Record)
    }

    /// Whether the variable is of a TABLE OF, VARRAY or INDEX BY inline type
    pub fn is_collection(&self) -> bool {
        self.inline_type.as_ref().is_some_and(|t| {
            matches!(
                t.category(),
                TypeCategory::TableOf | TypeCategory::Varray | TypeCategory::IndexBy
            )
        })
    }
}

/// Declarations of one block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableScope {
    name: String,
    variables: HashMap<String, VariableDefinition>,
}

impl VariableScope {
    /// Create an empty scope; the name is used for diagnostics only
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: HashMap::new(),
        }
    }

    /// Add a variable, replacing an earlier declaration of the same name
    pub fn add_variable(&mut self, name: &str, definition: VariableDefinition) {
        self.variables.insert(normalize(name), definition);
    }

    pub fn get_variable(&self, name: &str) -> Option<&VariableDefinition> {
        self.variables.get(&normalize(name))
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(&normalize(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &HashMap<String, VariableDefinition> {
        &self.variables
    }
}

impl fmt::Display for VariableScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} variables)", self.name, self.variables.len())
    }
}

/// Stack of block scopes, innermost last
#[derive(Debug, Clone, Default)]
pub struct VariableScopeStack {
    scopes: Vec<VariableScope>,
}

impl VariableScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a block
    pub fn push(&mut self, name: impl Into<String>) {
        let scope = VariableScope::new(name);
        trace!(scope = %scope.name(), depth = self.scopes.len() + 1, "Push variable scope");
        self.scopes.push(scope);
    }

    /// Leave the innermost block
    ///
    /// # Errors
    ///
    /// Returns `SemanticError::ScopeStackEmpty` when no block is open.
    pub fn pop(&mut self) -> SemanticResult<VariableScope> {
        let scope = self.scopes.pop().ok_or(SemanticError::ScopeStackEmpty)?;
        trace!(scope = %scope.name(), depth = self.scopes.len(), "Pop variable scope");
        Ok(scope)
    }

    /// Declare a variable in the innermost block
    ///
    /// # Errors
    ///
    /// Returns `SemanticError::NoActiveScope` when no block is open.
    pub fn register(&mut self, name: &str, definition: VariableDefinition) -> SemanticResult<()> {
        let scope = self
            .scopes
            .last_mut()
            .ok_or_else(|| SemanticError::NoActiveScope(name.to_string()))?;
        scope.add_variable(name, definition);
        Ok(())
    }

    /// Find a variable, innermost block first
    pub fn lookup(&self, name: &str) -> Option<&VariableDefinition> {
        let name = normalize(name);
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.variables.get(&name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Innermost open scope
    pub fn current(&self) -> Option<&VariableScope> {
        self.scopes.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orapg_ir::ConversionStrategy;

    fn def(name: &str, ty: &str) -> VariableDefinition {
        VariableDefinition::new(name, ty, "text")
    }

    #[test]
    fn test_shadowing() {
        let mut stack = VariableScopeStack::new();
        stack.push("outer");
        stack.register("v", def("v", "outer-def")).unwrap();
        stack.push("inner");
        stack.register("v", def("v", "inner-def")).unwrap();

        assert_eq!(stack.lookup("v").unwrap().oracle_type, "inner-def");

        let popped = stack.pop().unwrap();
        assert_eq!(popped.name(), "inner");
        assert_eq!(stack.lookup("V").unwrap().oracle_type, "outer-def");
    }

    #[test]
    fn test_pop_empty_fails() {
        let mut stack = VariableScopeStack::new();
        assert!(matches!(stack.pop(), Err(SemanticError::ScopeStackEmpty)));
    }

    #[test]
    fn test_register_without_scope_fails() {
        let mut stack = VariableScopeStack::new();
        let err = stack.register("v_count", def("v_count", "NUMBER")).unwrap_err();
        assert!(matches!(err, SemanticError::NoActiveScope(ref name) if name == "v_count"));
    }

    #[test]
    fn test_outer_variables_visible_from_inner() {
        let mut stack = VariableScopeStack::new();
        stack.push("outer");
        stack.register("v_Outer", def("v_outer", "NUMBER")).unwrap();
        stack.push("inner");

        assert!(stack.contains("V_OUTER"));
        assert!(!stack.contains("v_missing"));
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn test_lookup_ignores_case_across_scopes() {
        let mut stack = VariableScopeStack::new();
        stack.push("outer");
        stack.register("V_Total", def("v_total", "NUMBER")).unwrap();
        stack.push("inner");

        assert_eq!(stack.lookup("v_TOTAL").unwrap().variable_name, "v_total");
        assert!(stack.current().unwrap().variables().is_empty());
        stack.pop().unwrap();
        assert!(stack.current().unwrap().has_variable("v_total"));
        assert!(stack.current().unwrap().variables().contains_key("v_total"));
    }

    #[test]
    fn test_redeclaration_overwrites() {
        let mut scope = VariableScope::new("block");
        scope.add_variable("x", def("x", "NUMBER"));
        scope.add_variable("X", def("x", "DATE"));
        assert_eq!(scope.variables().len(), 1);
        assert_eq!(scope.get_variable("x").unwrap().oracle_type, "DATE");
        assert_eq!(scope.to_string(), "block (1 variables)");
    }

    #[test]
    fn test_inline_type_classification() {
        let record = InlineTypeDefinition::new("rec_t", TypeCategory::Record, ConversionStrategy::Jsonb)
            .unwrap();
        let list = InlineTypeDefinition::new("list_t", TypeCategory::IndexBy, ConversionStrategy::Jsonb)
            .unwrap();
        let rowtype = InlineTypeDefinition::new("emp%ROWTYPE", TypeCategory::Rowtype, ConversionStrategy::Jsonb)
            .unwrap();

        let r = def("r", "rec_t").with_inline_type(record);
        assert!(r.is_record());
        assert!(!r.is_collection());

        let l = def("l", "list_t").with_inline_type(list);
        assert!(l.is_collection());
        assert!(!l.is_record());

        let row = def("row", "emp%ROWTYPE").with_inline_type(rowtype);
        assert!(row.has_inline_type());
        assert!(!row.is_record());
        assert!(!row.is_collection());

        assert!(!def("n", "NUMBER").is_record());
    }

    #[test]
    fn test_constant_definition() {
        let c = def("c_max", "NUMBER").constant().with_default("100");
        assert!(c.is_constant);
        assert_eq!(c.default_value.as_deref(), Some("100"));
    }
}
