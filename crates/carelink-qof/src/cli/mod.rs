//! CLI functionality for the QOF tool
//!
//! This module contains all CLI-related functionality including:
//! - Population scans
//! - Coverage reporting
//! - Catalog inspection
//! - Output formatting

#[cfg(feature = "cli")]
pub mod catalog;
#[cfg(feature = "cli")]
pub mod coverage;
#[cfg(feature = "cli")]
pub mod output;
#[cfg(feature = "cli")]
pub mod scan;

#[cfg(feature = "cli")]
use anyhow::Context;
#[cfg(feature = "cli")]
use carelink_qof_catalog::IndicatorCatalog;
#[cfg(feature = "cli")]
use std::path::Path;

/// Load the indicator catalog for a command
///
/// A custom catalog file overrides the built-in rule set entirely.
#[cfg(feature = "cli")]
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<IndicatorCatalog> {
    crate::load_catalog(path).with_context(|| match path {
        Some(path) => format!("Failed to load catalog: {}", path.display()),
        None => "Failed to load built-in catalog".to_string(),
    })
}
