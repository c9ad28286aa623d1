//! Action aggregation across patients and indicators
//!
//! The aggregator sweeps every (patient, indicator) combination through
//! the rule evaluator, dedupes by `(patient_id, indicator_id)`, sorts
//! the surviving actions by priority with a stable comparator, and
//! computes summary statistics once. Evaluation failures for a single
//! combination are isolated: the sweep continues and the skip is
//! reported back alongside the successful actions.

use crate::context::EvaluationContext;
use crate::error::EvalError;
use crate::evaluate::{evaluate_indicator, ClinicalAction};
use carelink_qof_catalog::IndicatorCatalog;
use carelink_qof_diagnostics::Diagnostic;
use carelink_qof_types::{Category, Observation, PatientId, PatientSnapshot, Priority};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One patient's evaluation input: snapshot plus observation stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientCase {
    pub snapshot: PatientSnapshot,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

/// A combination the sweep skipped because evaluation failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedEvaluation {
    pub indicator_id: String,
    pub patient_id: PatientId,
    pub reason: String,
}

impl SkippedEvaluation {
    fn from_error(indicator_id: &str, patient_id: &PatientId, error: &EvalError) -> Self {
        Self {
            indicator_id: indicator_id.to_string(),
            patient_id: patient_id.clone(),
            reason: error.to_string(),
        }
    }

    /// Diagnostic record for caller-facing partial-result warnings
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::warning(carelink_qof_diagnostics::QOF0100, self.reason.clone())
            .with_indicator(self.indicator_id.clone())
            .with_patient(self.patient_id.to_string())
    }
}

/// Summary statistics over one aggregated action list
///
/// Computed once when the outcome is built, not per access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSummary {
    pub total: usize,
    /// Count per priority, all four levels present
    pub by_priority: IndexMap<Priority, usize>,
    /// Count per category, only categories with actions present
    pub by_category: IndexMap<Category, usize>,
}

impl ActionSummary {
    fn compute(actions: &[ClinicalAction]) -> Self {
        let mut by_priority: IndexMap<Priority, usize> =
            Priority::ALL.iter().map(|p| (*p, 0)).collect();
        let mut by_category: IndexMap<Category, usize> = IndexMap::new();

        for action in actions {
            *by_priority.entry(action.priority).or_default() += 1;
            *by_category.entry(action.category).or_default() += 1;
        }

        Self {
            total: actions.len(),
            by_priority,
            by_category,
        }
    }
}

/// Result of one aggregation sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateOutcome {
    /// Actions sorted by priority, stable within equal priorities
    pub actions: Vec<ClinicalAction>,
    /// Combinations excluded from `actions`, for partial-result warnings
    pub skipped: Vec<SkippedEvaluation>,
    pub summary: ActionSummary,
}

impl AggregateOutcome {
    fn from_parts(mut actions: Vec<ClinicalAction>, skipped: Vec<SkippedEvaluation>) -> Self {
        // sort_by_key is stable: equal priorities keep encounter order
        actions.sort_by_key(|action| action.priority.ordinal());
        let summary = ActionSummary::compute(&actions);
        Self {
            actions,
            skipped,
            summary,
        }
    }

    /// Merge a later batch into this outcome
    ///
    /// At most one action survives per `(patient_id, indicator_id)`;
    /// entries from `newer` replace entries from `self`. Used when a
    /// routine scan and an ad hoc scan cover overlapping patients.
    pub fn merge(self, newer: AggregateOutcome) -> AggregateOutcome {
        let mut keyed: IndexMap<(PatientId, String), ClinicalAction> = IndexMap::new();
        for action in self.actions.into_iter().chain(newer.actions) {
            let key = (action.patient_id.clone(), action.indicator_id.clone());
            keyed.insert(key, action);
        }

        let mut skipped = self.skipped;
        skipped.extend(newer.skipped);
        Self::from_parts(keyed.into_values().collect(), skipped)
    }
}

/// Sweeps a patient population against an immutable indicator catalog
///
/// The catalog is injected at construction; swapping catalog versions
/// means building a new aggregator.
pub struct Aggregator {
    catalog: IndicatorCatalog,
    ctx: EvaluationContext,
}

impl Aggregator {
    /// Create an aggregator over a catalog and evaluation context
    pub fn new(catalog: IndicatorCatalog, ctx: EvaluationContext) -> Self {
        Self { catalog, ctx }
    }

    /// The catalog this aggregator evaluates against
    pub fn catalog(&self) -> &IndicatorCatalog {
        &self.catalog
    }

    /// Evaluate every indicator for every patient
    pub fn aggregate(&self, cases: &[PatientCase]) -> AggregateOutcome {
        let mut keyed: IndexMap<(PatientId, String), ClinicalAction> = IndexMap::new();
        let mut skipped = Vec::new();

        for case in cases {
            for indicator in self.catalog.iter() {
                match evaluate_indicator(
                    &self.ctx,
                    indicator,
                    &case.snapshot,
                    &case.observations,
                ) {
                    Ok(Some(action)) => {
                        let key = (action.patient_id.clone(), action.indicator_id.clone());
                        keyed.insert(key, action);
                    }
                    Ok(None) => {}
                    Err(error) => {
                        log::warn!(
                            "skipping indicator {} for patient {}: {}",
                            indicator.id,
                            case.snapshot.id,
                            error
                        );
                        skipped.push(SkippedEvaluation::from_error(
                            &indicator.id,
                            &case.snapshot.id,
                            &error,
                        ));
                    }
                }
            }
        }

        AggregateOutcome::from_parts(keyed.into_values().collect(), skipped)
    }
}
