// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Resolution Context
//!
//! One [`ResolutionContext`] drives the transformation of one unit (a plain
//! SQL statement, a function or procedure, or a view body). It layers three
//! kinds of state:
//!
//! 1. **Global**: current schema, shared [`MetadataIndex`], type evaluator
//! 2. **Unit**: routine and package names, package contexts, view columns,
//!    inline types declared in the unit
//! 3. **Query**: table aliases, CTE names, variable scopes
//!
//! ## Resolution order
//!
//! A leading identifier is resolved as alias, then synonym, then
//! `schema.table`, then a table of the current schema. Oracle resolves
//! aliases first, and catalogs can hold an alias and a like-named table at
//! the same time.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use orapg_semantic::{MetadataIndex, NoopTypeEvaluator, ResolutionContext, UnitConfig, UnitKind};
//!
//! let unit = UnitConfig::new("HR").with_kind(UnitKind::package_member("payroll", "raise"));
//! let mut ctx = ResolutionContext::new(
//!     Arc::new(MetadataIndex::empty()),
//!     Box::new(NoopTypeEvaluator),
//!     unit,
//! )
//! .unwrap();
//!
//! ctx.register_alias("E", "Employees");
//! assert_eq!(ctx.resolve_alias("e"), Some("employees"));
//! assert_eq!(ctx.get_package_variable_getter("Payroll", "G_Rate"), "hr.payroll__get_g_rate()");
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use orapg_ir::names::{is_qualified, normalize, qualify, PUBLIC_SCHEMA, SYS_SCHEMA};
use orapg_ir::{ColumnTypeInfo, InlineTypeDefinition};
use orapg_package::PackageContext;
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::{SemanticError, SemanticResult};
use crate::index::MetadataIndex;
use crate::scope::{VariableDefinition, VariableScope, VariableScopeStack};
use crate::types::TypeEvaluator;

/// Kind of unit a context is created for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UnitKind {
    /// Standalone SQL statement
    #[default]
    PlainSql,
    /// Function or procedure, standalone or inside a package
    Routine {
        function_name: String,
        package_name: Option<String>,
    },
    /// View body with the target column types
    View {
        /// Lowercase column name → target type
        column_types: HashMap<String, String>,
        /// Column names in SELECT-list order
        column_order: Vec<String>,
    },
}

impl UnitKind {
    /// Standalone function or procedure
    pub fn routine(function_name: impl Into<String>) -> Self {
        UnitKind::Routine {
            function_name: function_name.into(),
            package_name: None,
        }
    }

    /// Function or procedure inside a package
    pub fn package_member(package_name: impl Into<String>, function_name: impl Into<String>) -> Self {
        UnitKind::Routine {
            function_name: function_name.into(),
            package_name: Some(package_name.into()),
        }
    }

    /// View body; column type keys are lowercased
    pub fn view(column_types: HashMap<String, String>, column_order: Vec<String>) -> Self {
        UnitKind::View {
            column_types: column_types
                .into_iter()
                .map(|(name, ty)| (normalize(&name), ty))
                .collect(),
            column_order,
        }
    }
}

/// Everything needed to create a [`ResolutionContext`] for one unit
#[derive(Debug, Clone, Default)]
pub struct UnitConfig {
    pub current_schema: String,
    pub kind: UnitKind,
    /// Package contexts keyed by lowercase `schema.package`
    pub package_contexts: Arc<HashMap<String, PackageContext>>,
}

impl UnitConfig {
    /// Plain SQL unit in the given schema
    pub fn new(current_schema: impl Into<String>) -> Self {
        Self {
            current_schema: current_schema.into(),
            kind: UnitKind::PlainSql,
            package_contexts: Arc::new(HashMap::new()),
        }
    }

    /// Plain SQL unit in the session's current schema
    pub fn from_session(config: &SessionConfig) -> SemanticResult<Self> {
        config.validate()?;
        let schema = config.current_schema().ok_or_else(|| {
            SemanticError::InvalidArgument("session has no current schema".to_string())
        })?;
        Ok(Self::new(schema))
    }

    /// Builder method: set the unit kind
    pub fn with_kind(mut self, kind: UnitKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder method: share an existing package context cache
    pub fn with_package_contexts(mut self, contexts: Arc<HashMap<String, PackageContext>>) -> Self {
        self.package_contexts = contexts;
        self
    }

    /// Builder method: add one package context under its cache key
    pub fn with_package_context(mut self, context: PackageContext) -> Self {
        Arc::make_mut(&mut self.package_contexts).insert(context.cache_key(), context);
        self
    }
}

/// Per-unit resolution state
pub struct ResolutionContext {
    // Global
    current_schema: String,
    index: Arc<MetadataIndex>,
    type_evaluator: Box<dyn TypeEvaluator>,

    // Unit
    function_name: Option<String>,
    package_name: Option<String>,
    package_contexts: Arc<HashMap<String, PackageContext>>,
    view_column_types: Option<HashMap<String, String>>,
    view_column_order: Vec<String>,
    select_list_position: Option<usize>,
    inline_types: HashMap<String, InlineTypeDefinition>,

    // Query
    aliases: HashMap<String, String>,
    ctes: HashSet<String>,
    scopes: VariableScopeStack,
}

impl fmt::Debug for ResolutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionContext")
            .field("current_schema", &self.current_schema)
            .field("function_name", &self.function_name)
            .field("package_name", &self.package_name)
            .field("aliases", &self.aliases)
            .field("ctes", &self.ctes)
            .field("scope_depth", &self.scopes.depth())
            .finish_non_exhaustive()
    }
}

impl ResolutionContext {
    /// Create a context for one unit
    ///
    /// # Errors
    ///
    /// Returns `SemanticError::InvalidArgument` if the current schema is blank.
    pub fn new(
        index: Arc<MetadataIndex>,
        type_evaluator: Box<dyn TypeEvaluator>,
        unit: UnitConfig,
    ) -> SemanticResult<Self> {
        let current_schema = unit.current_schema.trim();
        if current_schema.is_empty() {
            return Err(SemanticError::InvalidArgument(
                "current schema cannot be empty".to_string(),
            ));
        }

        let (function_name, package_name, view_column_types, view_column_order) = match unit.kind {
            UnitKind::PlainSql => (None, None, None, Vec::new()),
            UnitKind::Routine {
                function_name,
                package_name,
            } => (Some(function_name), package_name, None, Vec::new()),
            UnitKind::View {
                column_types,
                column_order,
            } => (None, None, Some(column_types), column_order),
        };

        Ok(Self {
            current_schema: normalize(current_schema),
            index,
            type_evaluator,
            function_name,
            package_name,
            package_contexts: unit.package_contexts,
            view_column_types,
            view_column_order,
            select_list_position: None,
            inline_types: HashMap::new(),
            aliases: HashMap::new(),
            ctes: HashSet::new(),
            scopes: VariableScopeStack::new(),
        })
    }

    // ---- global layer ----

    /// Current schema, lowercase
    pub fn current_schema(&self) -> &str {
        &self.current_schema
    }

    pub fn index(&self) -> &MetadataIndex {
        &self.index
    }

    pub fn type_evaluator(&self) -> &dyn TypeEvaluator {
        self.type_evaluator.as_ref()
    }

    pub fn type_evaluator_mut(&mut self) -> &mut dyn TypeEvaluator {
        self.type_evaluator.as_mut()
    }

    // ---- unit layer ----

    pub fn current_function_name(&self) -> Option<&str> {
        self.function_name.as_deref()
    }

    pub fn current_package_name(&self) -> Option<&str> {
        self.package_name.as_deref()
    }

    pub fn is_in_package_member(&self) -> bool {
        self.package_name.is_some()
    }

    // ---- metadata lookups ----

    /// Resolve a synonym as seen from the current schema
    pub fn resolve_synonym(&self, name: &str) -> Option<&str> {
        self.index.resolve_synonym(&self.current_schema, name)
    }

    pub fn get_column_type(&self, qualified_table: &str, column: &str) -> Option<&ColumnTypeInfo> {
        self.index.get_column_type(qualified_table, column)
    }

    pub fn has_type_method(&self, qualified_type: &str, method: &str) -> bool {
        self.index.has_type_method(qualified_type, method)
    }

    pub fn is_package_function(&self, qualified_function: &str) -> bool {
        self.index.is_package_function(qualified_function)
    }

    pub fn get_field_type(&self, qualified_type: &str, field: &str) -> Option<&str> {
        self.index.get_field_type(qualified_type, field)
    }

    pub fn is_object_type(&self, qualified_type: &str) -> bool {
        self.index.is_object_type(qualified_type)
    }

    pub fn get_type_fields(&self, qualified_type: &str) -> Option<&HashMap<String, String>> {
        self.index.get_type_fields(qualified_type)
    }

    /// Qualify a type name with the schema that defines it as an object type
    ///
    /// Tries, in order: an already qualified name, a synonym whose target is
    /// an object type, then the current, `public` and `sys` schemas. When
    /// nothing matches, the lowercased name is returned unqualified so the
    /// target database reports the missing type. Blank input is returned
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use orapg_semantic::{MetadataIndex, NoopTypeEvaluator, ResolutionContext, UnitConfig};
    ///
    /// let ctx = ResolutionContext::new(
    ///     Arc::new(MetadataIndex::empty()),
    ///     Box::new(NoopTypeEvaluator),
    ///     UnitConfig::new("hr"),
    /// )
    /// .unwrap();
    /// assert_eq!(ctx.qualify_type_name("HR.Address_Type"), "hr.address_type");
    /// assert_eq!(ctx.qualify_type_name("Unknown_T"), "unknown_t");
    /// ```
    pub fn qualify_type_name(&self, type_name: &str) -> String {
        if type_name.trim().is_empty() {
            return type_name.to_string();
        }

        let normalized = normalize(type_name);

        if is_qualified(&normalized) {
            if !self.index.is_object_type(&normalized) {
                debug!(type_name = %normalized, "Qualified type is not a known object type");
            }
            return normalized;
        }

        if let Some(target) = self.resolve_synonym(&normalized) {
            if self.index.is_object_type(target) {
                return target.to_string();
            }
        }

        for schema in [self.current_schema.as_str(), PUBLIC_SCHEMA, SYS_SCHEMA] {
            let qualified = qualify(schema, &normalized);
            if self.index.is_object_type(&qualified) {
                return qualified;
            }
        }

        debug!(type_name = %normalized, "Type not found in any schema, leaving unqualified");
        normalized
    }

    // ---- query layer: aliases and CTEs ----

    /// Register a table alias for the current query
    ///
    /// The updated alias map is pushed to the type evaluator when it is
    /// alias aware.
    pub fn register_alias(&mut self, alias: &str, table: &str) {
        self.aliases.insert(normalize(alias), normalize(table));
        self.sync_evaluator_aliases();
    }

    pub fn resolve_alias(&self, alias: &str) -> Option<&str> {
        self.aliases.get(&normalize(alias)).map(String::as_str)
    }

    pub fn clear_aliases(&mut self) {
        self.aliases.clear();
        self.sync_evaluator_aliases();
    }

    pub fn register_cte(&mut self, name: &str) {
        self.ctes.insert(normalize(name));
    }

    /// Whether a name refers to a CTE of the current query
    pub fn is_cte(&self, name: &str) -> bool {
        self.ctes.contains(&normalize(name))
    }

    pub fn clear_ctes(&mut self) {
        self.ctes.clear();
    }

    /// Clear aliases and CTEs at a statement boundary; variable scopes stay
    pub fn reset_query_state(&mut self) {
        self.clear_ctes();
        self.clear_aliases();
    }

    fn sync_evaluator_aliases(&mut self) {
        if let Some(aware) = self.type_evaluator.alias_aware() {
            aware.set_table_aliases(&self.aliases);
        }
    }

    // ---- query layer: variable scopes ----

    pub fn push_variable_scope(&mut self, label: impl Into<String>) {
        self.scopes.push(label);
    }

    /// Leave the innermost variable scope
    ///
    /// # Errors
    ///
    /// Returns `SemanticError::ScopeStackEmpty` when no scope is open.
    pub fn pop_variable_scope(&mut self) -> SemanticResult<VariableScope> {
        self.scopes.pop()
    }

    /// Declare a variable in the innermost scope
    ///
    /// # Errors
    ///
    /// Returns `SemanticError::NoActiveScope` when no scope is open.
    pub fn register_variable(&mut self, name: &str, definition: VariableDefinition) -> SemanticResult<()> {
        self.scopes.register(name, definition)
    }

    /// Find a local variable, innermost scope first
    pub fn lookup_variable(&self, name: &str) -> Option<&VariableDefinition> {
        self.scopes.lookup(name)
    }

    /// Whether an identifier names a declared local variable
    pub fn is_local_variable(&self, name: &str) -> bool {
        self.scopes.contains(name)
    }

    pub fn variable_scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    /// Run `f` inside a new variable scope
    ///
    /// The scope is closed again whether `f` succeeds or fails, and any
    /// scopes `f` left open are closed with it.
    ///
    /// # Errors
    ///
    /// Returns the error of `f`, or `SemanticError::ScopeStackEmpty` if `f`
    /// closed more scopes than it opened. Scopes popped that way are gone:
    /// the stack is left shorter than it was on entry.
    pub fn with_variable_scope<T>(
        &mut self,
        label: impl Into<String>,
        f: impl FnOnce(&mut Self) -> SemanticResult<T>,
    ) -> SemanticResult<T> {
        let depth = self.scopes.depth();
        self.scopes.push(label);

        let result = f(self);

        if self.scopes.depth() <= depth {
            return Err(SemanticError::ScopeStackEmpty);
        }
        while self.scopes.depth() > depth {
            self.scopes.pop()?;
        }
        result
    }

    // ---- package variables ----

    fn package_key(&self, package: &str) -> String {
        qualify(&self.current_schema, package)
    }

    /// Package context of a package in the current schema
    pub fn get_package_context(&self, package: &str) -> Option<&PackageContext> {
        self.package_contexts.get(&self.package_key(package))
    }

    /// Whether `package.variable` is a known package variable
    pub fn is_package_variable(&self, package: &str, variable: &str) -> bool {
        self.get_package_context(package)
            .is_some_and(|ctx| ctx.has_variable(variable))
    }

    /// Call text reading a package variable: `schema.pkg__get_var()`
    pub fn get_package_variable_getter(&self, package: &str, variable: &str) -> String {
        format!(
            "{}.{}__get_{}()",
            self.current_schema,
            normalize(package),
            normalize(variable)
        )
    }

    /// Statement text assigning a package variable: `PERFORM schema.pkg__set_var(value)`
    ///
    /// The value expression is copied verbatim.
    pub fn get_package_variable_setter(&self, package: &str, variable: &str, value: &str) -> String {
        format!(
            "PERFORM {}.{}__set_{}({})",
            self.current_schema,
            normalize(package),
            normalize(variable),
            value
        )
    }

    // ---- inline types ----

    /// Register a type declared in the current block, replacing an earlier one
    pub fn register_inline_type(&mut self, name: &str, definition: InlineTypeDefinition) {
        self.inline_types.insert(normalize(name), definition);
    }

    /// Type declared in the current unit
    pub fn get_inline_type(&self, name: &str) -> Option<&InlineTypeDefinition> {
        self.inline_types.get(&normalize(name))
    }

    /// Resolve an inline type: block level, then the current package
    pub fn resolve_inline_type(&self, name: &str) -> Option<&InlineTypeDefinition> {
        if let Some(definition) = self.get_inline_type(name) {
            return Some(definition);
        }

        if let Some(definition) = self
            .package_name
            .as_deref()
            .and_then(|package| self.get_package_context(package))
            .and_then(|ctx| ctx.get_type(name))
        {
            return Some(definition);
        }

        self.schema_inline_type(name)
    }

    // TODO: resolve schema-level collection types once the index records them
    fn schema_inline_type(&self, _name: &str) -> Option<&InlineTypeDefinition> {
        None
    }

    // ---- views ----

    pub fn is_view_transformation(&self) -> bool {
        self.view_column_types.is_some()
    }

    /// Target type of a view column
    pub fn get_view_column_type(&self, column: &str) -> Option<&str> {
        self.view_column_types
            .as_ref()?
            .get(&normalize(column))
            .map(String::as_str)
    }

    pub fn has_view_column_type(&self, column: &str) -> bool {
        self.get_view_column_type(column).is_some()
    }

    /// Track the SELECT-list item being rendered, `None` outside the list
    pub fn set_current_select_list_position(&mut self, position: Option<usize>) {
        self.select_list_position = position;
    }

    pub fn current_select_list_position(&self) -> Option<usize> {
        self.select_list_position
    }

    pub fn get_view_column_name_by_position(&self, position: usize) -> Option<&str> {
        self.view_column_order.get(position).map(String::as_str)
    }

    /// Target type of the view column at a SELECT-list position
    pub fn get_view_column_type_by_position(&self, position: usize) -> Option<&str> {
        let name = self.get_view_column_name_by_position(position)?;
        self.get_view_column_type(name)
    }
}
