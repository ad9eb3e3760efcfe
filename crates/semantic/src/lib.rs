// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # orapg - Semantic Resolution Layer
//!
//! This crate answers the name questions an Oracle to PostgreSQL
//! transformation asks while it walks a parsed unit.
//!
//! ## Overview
//!
//! - **Metadata index**: case-insensitive lookup tables over catalog
//!   records, built once per session by [`MetadataIndexBuilder`]
//! - **Resolution context**: per-unit state layered over the index:
//!   aliases, CTEs, variable scopes, package variables, view columns
//! - **Field access rewriting**: `t.obj_col.field` becomes
//!   `(t.obj_col).field`
//!
//! ## Core Concepts
//!
//! ### MetadataIndex
//!
//! Built from a [`Catalog`](orapg_catalog::Catalog) and shared read-only:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use orapg_semantic::MetadataIndexBuilder;
//!
//! let index = Arc::new(MetadataIndexBuilder::build(&catalog, &["HR"]).await?);
//! ```
//!
//! ### ResolutionContext
//!
//! One per transformed unit, never reused:
//!
//! ```rust
//! use std::sync::Arc;
//! use orapg_semantic::{
//!     MetadataIndexBuilder, NoopTypeEvaluator, ResolutionContext, UnitConfig, VariableDefinition,
//! };
//!
//! let index = Arc::new(MetadataIndexBuilder::build_empty());
//! let mut ctx = ResolutionContext::new(index, Box::new(NoopTypeEvaluator), UnitConfig::new("hr"))
//!     .unwrap();
//!
//! ctx.push_variable_scope("declare");
//! ctx.register_variable("v_total", VariableDefinition::new("v_total", "NUMBER", "numeric"))
//!     .unwrap();
//! assert!(ctx.is_local_variable("V_TOTAL"));
//! ctx.pop_variable_scope().unwrap();
//! ```
//!
//! ### ObjectFieldAccessTransformer
//!
//! ```rust,ignore
//! use orapg_semantic::ObjectFieldAccessTransformer;
//!
//! ctx.register_alias("l", "langtable");
//! let transformer = ObjectFieldAccessTransformer::new(&ctx);
//! assert_eq!(transformer.transform("l.langy.de").as_deref(), Some("(l.langy).de"));
//! ```
//!
//! ## Concurrency
//!
//! [`MetadataIndex`] is `Send + Sync` and immutable; share it through `Arc`
//! between workers. A [`ResolutionContext`] belongs to one traversal.

pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod field_access;
pub mod index;
pub mod scope;
pub mod types;

// Re-exports
pub use builder::MetadataIndexBuilder;
pub use config::{ConfigError, SessionConfig};
pub use context::{ResolutionContext, UnitConfig, UnitKind};
pub use error::{SemanticError, SemanticResult};
pub use field_access::ObjectFieldAccessTransformer;
pub use index::{IndexStats, MetadataIndex};
pub use scope::{VariableDefinition, VariableScope, VariableScopeStack};
pub use types::{AliasAware, NoopTypeEvaluator, SimpleTypeEvaluator, TypeEvaluator};
