// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Package contexts
//!
//! A [`PackageContext`] collects the package-level state of one PL/SQL
//! package: its variables and the types declared in its spec or body.
//! Package variables become session-scoped state in PostgreSQL, reached
//! through generated getter and setter functions.

use std::collections::HashMap;
use std::fmt;

use orapg_ir::InlineTypeDefinition;
use serde::{Deserialize, Serialize};

/// A variable declared at package level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageVariable {
    pub variable_name: String,
    pub data_type: String,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub is_constant: bool,
}

impl PackageVariable {
    /// Create a non-constant variable without a default
    pub fn new(variable_name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            variable_name: variable_name.into(),
            data_type: data_type.into(),
            default_value: None,
            is_constant: false,
        }
    }

    /// Builder method: set the default expression
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Builder method: mark as CONSTANT
    pub fn constant(mut self) -> Self {
        self.is_constant = true;
        self
    }
}

/// Package-level variables and types of one package
///
/// Variable and type names are stored lowercase, so lookups are
/// case-insensitive.
///
/// # Examples
///
/// ```
/// use orapg_package::{PackageContext, PackageVariable};
///
/// let mut ctx = PackageContext::new("HR", "Payroll");
/// ctx.add_variable(PackageVariable::new("g_Counter", "NUMBER").with_default("0"));
///
/// assert_eq!(ctx.cache_key(), "hr.payroll");
/// assert!(ctx.has_variable("G_COUNTER"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageContext {
    schema: String,
    package_name: String,
    variables: HashMap<String, PackageVariable>,
    types: HashMap<String, InlineTypeDefinition>,
    helpers_created: bool,
}

impl PackageContext {
    pub fn new(schema: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            package_name: package_name.into(),
            variables: HashMap::new(),
            types: HashMap::new(),
            helpers_created: false,
        }
    }

    /// Add a variable, replacing any earlier declaration with the same name
    pub fn add_variable(&mut self, variable: PackageVariable) {
        self.variables
            .insert(variable.variable_name.to_lowercase(), variable);
    }

    pub fn get_variable(&self, name: &str) -> Option<&PackageVariable> {
        self.variables.get(&name.to_lowercase())
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(&name.to_lowercase())
    }

    /// Add a declared type, replacing any earlier declaration with the same name
    pub fn add_type(&mut self, definition: InlineTypeDefinition) {
        self.types
            .insert(definition.type_name().to_lowercase(), definition);
    }

    pub fn get_type(&self, name: &str) -> Option<&InlineTypeDefinition> {
        self.types.get(&name.to_lowercase())
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(&name.to_lowercase())
    }

    /// Key used by package-context caches: lowercase `schema.package`
    pub fn cache_key(&self) -> String {
        format!("{}.{}", self.schema, self.package_name).to_lowercase()
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn variables(&self) -> &HashMap<String, PackageVariable> {
        &self.variables
    }

    pub fn types(&self) -> &HashMap<String, InlineTypeDefinition> {
        &self.types
    }

    /// Whether the getter/setter helpers for this package were already generated
    pub fn helpers_created(&self) -> bool {
        self.helpers_created
    }

    pub fn set_helpers_created(&mut self, created: bool) {
        self.helpers_created = created;
    }
}

impl fmt::Display for PackageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} ({} variables, {} types)",
            self.schema,
            self.package_name,
            self.variables.len(),
            self.types.len()
        )
    }
}
