// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for the orapg crates
//!
//! This crate provides common testing components including:
//! - Mock catalog implementations
//! - Catalog fixtures for a small HR/SALES schema
//! - Sample package sources with their routine segments

pub mod fixtures;
pub mod mock_catalog;

// Re-exports for convenience
pub use fixtures::{CatalogFixtures, PackageFixtures};
pub use mock_catalog::{MockCatalog, MockCatalogBuilder};
