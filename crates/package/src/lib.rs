// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # orapg - Package Layer
//!
//! This crate holds what the transformer knows about PL/SQL packages.
//!
//! ## Architecture
//!
//! - [`PackageContext`]: package-level variables and declared types of one
//!   package, keyed by `schema.package`
//! - [`PackageSegments`]: byte ranges of the routines inside a package body,
//!   produced by a lexical scanner
//! - [`PackageBodyReducer`]: removes those ranges so only the declarations
//!   are left to parse
//!
//! ## Usage
//!
//! ```
//! use orapg_package::{FunctionSegment, PackageBodyReducer, PackageSegments};
//!
//! let body = "v NUMBER; FUNCTION f RETURN NUMBER IS BEGIN RETURN 1; END; c CONSTANT NUMBER := 1;";
//! let mut segments = PackageSegments::new();
//! segments.add_function(FunctionSegment::new("f", 10, 59, 37, 54, true));
//!
//! let reduced = PackageBodyReducer::remove_all_functions(body, &segments).unwrap();
//! assert_eq!(reduced, "v NUMBER; c CONSTANT NUMBER := 1;");
//! ```

pub mod context;
pub mod error;
pub mod reducer;
pub mod segments;

// Re-exports
pub use context::{PackageContext, PackageVariable};
pub use error::{PackageError, PackageResult};
pub use reducer::PackageBodyReducer;
pub use segments::{FunctionSegment, PackageSegments};
