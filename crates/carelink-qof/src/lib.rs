//! QOF clinical rules engine for UK primary care
//!
//! This crate ties the engine together:
//! - An indicator catalog with a built-in QOF rule set
//! - A pure rule evaluator producing prioritized clinical actions
//! - Population coverage reporting against indicator targets
//! - Async source traits for pulling patient data from a store
//!
//! # Example
//!
//! ```ignore
//! use carelink_qof::{builtin_catalog, Aggregator, EvaluationContext};
//!
//! let ctx = EvaluationContext::new(as_of);
//! let aggregator = Aggregator::new(builtin_catalog().clone(), ctx);
//! let outcome = aggregator.aggregate(&cases);
//! ```

// Re-export all public APIs from internal crates
pub use carelink_qof_catalog as catalog;
pub use carelink_qof_diagnostics as diagnostics;
pub use carelink_qof_eval as eval;
pub use carelink_qof_model as model;
pub use carelink_qof_types as types;

// Convenience re-exports
pub use carelink_qof_catalog::{builtin_catalog, Indicator, IndicatorCatalog};
pub use carelink_qof_diagnostics::{QofError, Result};
pub use carelink_qof_eval::{
    AggregateOutcome, Aggregator, ClinicalAction, CoverageReport, EvaluationContext,
    IndicatorCounts, PatientCase,
};

use carelink_qof_model::{ObservationSource, SnapshotSource};
use std::path::Path;

/// Load an indicator catalog, falling back to the built-in set
///
/// A custom catalog file replaces the built-in rule set entirely.
pub fn load_catalog(path: Option<&Path>) -> Result<IndicatorCatalog> {
    match path {
        Some(path) => Ok(IndicatorCatalog::from_json_file(path)?),
        None => Ok(builtin_catalog().clone()),
    }
}

/// Gather evaluation cases for every patient a data store knows
pub async fn collect_cases(
    snapshots: &dyn SnapshotSource,
    observations: &dyn ObservationSource,
) -> Result<Vec<PatientCase>> {
    Ok(carelink_qof_eval::collect_cases(snapshots, observations).await?)
}

/// Build a coverage report for a catalog from population counts
pub fn coverage_report(
    catalog: &IndicatorCatalog,
    counts: &[IndicatorCounts],
) -> Result<CoverageReport> {
    Ok(CoverageReport::build(catalog, counts)?)
}

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
