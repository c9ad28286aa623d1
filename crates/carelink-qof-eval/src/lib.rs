//! QOF rule evaluation engine
//!
//! This crate turns an indicator catalog and per-patient clinical data
//! into a prioritized list of clinical actions:
//!
//! - **Observation resolution**: newest-record selection per metric,
//!   with joint blood-pressure fields taken from a single record
//! - **Rule evaluation**: applicability gate, data-sufficiency check,
//!   threshold comparison with age/frailty threshold variants
//! - **Aggregation**: stable priority-ordered action list with keyed
//!   deduplication, batch merging and one-shot summary statistics
//! - **Coverage**: population attainment percentages per indicator for
//!   dashboard reporting
//!
//! Evaluation is pure and synchronous. All data fetching happens before
//! the engine runs, through the source traits in `carelink-qof-model`;
//! [`collect_cases`] bridges the two.
//!
//! # Example
//!
//! ```ignore
//! use carelink_qof_catalog::builtin_catalog;
//! use carelink_qof_eval::{Aggregator, EvaluationContext};
//!
//! let ctx = EvaluationContext::new(as_of);
//! let aggregator = Aggregator::new(builtin_catalog().clone(), ctx);
//! let outcome = aggregator.aggregate(&cases);
//! for action in &outcome.actions {
//!     println!("{}: {}", action.priority, action.reason);
//! }
//! ```

pub mod aggregate;
pub mod context;
pub mod coverage;
pub mod error;
pub mod evaluate;
pub mod resolver;
pub mod source;

pub use aggregate::{ActionSummary, AggregateOutcome, Aggregator, PatientCase, SkippedEvaluation};
pub use context::EvaluationContext;
pub use coverage::{calculate_coverage, Coverage, CoverageReport, CoverageStatus, IndicatorCounts};
pub use error::{EvalError, EvalResult};
pub use evaluate::{evaluate_indicator, ClinicalAction};
pub use resolver::{latest_blood_pressure, latest_value, BloodPressureReading, MetricReading};
pub use source::collect_cases;
