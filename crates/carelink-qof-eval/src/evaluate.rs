//! Per-indicator rule evaluation
//!
//! `evaluate_indicator` is a pure function over already-fetched data.
//! The pipeline is fixed: applicability gate, data sufficiency, then
//! threshold comparison. Threshold variants that depend on age or
//! frailty are resolved before any comparison happens, and exactly one
//! action is ever emitted per (patient, indicator) pair; "not recorded"
//! and "out of range" are mutually exclusive causes.

use crate::context::EvaluationContext;
use crate::error::{EvalError, EvalResult};
use crate::resolver::{latest_blood_pressure, latest_value};
use carelink_qof_catalog::{Check, Indicator};
use carelink_qof_types::{
    Category, DueWithin, Observation, PatientId, PatientSnapshot, Priority, SnapshotField,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Systolic reading at or above this escalates to critical
const SEVERE_SYSTOLIC: Decimal = dec!(180);
/// Diastolic reading at or above this escalates to critical
const SEVERE_DIASTOLIC: Decimal = dec!(110);

/// A derived clinical action for one patient against one indicator
///
/// Flat and serializable so UI, task-creation and export consumers can
/// use it without knowledge of the engine. Identity within one
/// evaluation run is `(patient_id, indicator_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalAction {
    pub patient_id: PatientId,
    pub indicator_id: String,
    pub code: String,
    pub category: Category,
    pub priority: Priority,
    /// Why the indicator failed, built from the triggering comparison
    pub reason: String,
    /// Recommended next step
    pub action_required: String,
    pub due_within: DueWithin,
}

/// Evaluate one indicator against one patient
///
/// Returns `Ok(None)` when the indicator does not apply or is
/// satisfied. Returns `Err` only for catalog/data type mismatches; the
/// aggregator isolates those per combination.
pub fn evaluate_indicator(
    ctx: &EvaluationContext,
    indicator: &Indicator,
    snapshot: &PatientSnapshot,
    observations: &[Observation],
) -> EvalResult<Option<ClinicalAction>> {
    if !indicator
        .applicability
        .matches(snapshot, ctx.as_of(), ctx.matcher())
    {
        return Ok(None);
    }

    match &indicator.check {
        Check::BloodPressureControl {
            systolic_max,
            diastolic_max,
            relaxed_systolic_max,
            relaxed_diastolic_max,
            relaxed_from_age,
        } => {
            // Resolve the age-dependent threshold variant up front
            let age = snapshot.age_on(ctx.as_of());
            let (sys_max, dia_max) = if age.is_some_and(|a| a >= *relaxed_from_age) {
                (*relaxed_systolic_max, *relaxed_diastolic_max)
            } else {
                (*systolic_max, *diastolic_max)
            };

            match latest_blood_pressure(&snapshot.id, observations) {
                None => Ok(Some(emit(
                    indicator,
                    snapshot,
                    indicator.missing_data_priority,
                    "No blood pressure reading recorded".to_string(),
                    "Arrange blood pressure measurement".to_string(),
                ))),
                Some(reading) => {
                    if reading.systolic <= sys_max && reading.diastolic <= dia_max {
                        return Ok(None);
                    }
                    let priority = if reading.systolic >= SEVERE_SYSTOLIC
                        || reading.diastolic >= SEVERE_DIASTOLIC
                    {
                        Priority::Critical
                    } else {
                        Priority::High
                    };
                    Ok(Some(emit(
                        indicator,
                        snapshot,
                        priority,
                        format!(
                            "Blood pressure {}/{} above target {}/{}",
                            reading.systolic, reading.diastolic, sys_max, dia_max
                        ),
                        "Review blood pressure management".to_string(),
                    )))
                }
            }
        }

        Check::Hba1cControl {
            standard_max,
            frail_max,
            frail_from,
            critical_above,
        } => {
            // Frailty is read once; the relaxed limit applies from the
            // configured level upward
            let limit = if snapshot.frailty_at_least(*frail_from) {
                *frail_max
            } else {
                *standard_max
            };

            match snapshot.hba1c_mmol_mol {
                None => Ok(Some(emit(
                    indicator,
                    snapshot,
                    indicator.missing_data_priority,
                    "No HbA1c result recorded".to_string(),
                    "Arrange blood test for HbA1c".to_string(),
                ))),
                Some(value) if value <= limit => Ok(None),
                Some(value) => {
                    let priority = if value > *critical_above {
                        Priority::Critical
                    } else {
                        Priority::High
                    };
                    Ok(Some(emit(
                        indicator,
                        snapshot,
                        priority,
                        format!("HbA1c {value} mmol/mol above target {limit} mmol/mol"),
                        "Review diabetes management".to_string(),
                    )))
                }
            }
        }

        Check::FieldRecorded { field } => {
            if field.is_recorded(snapshot) {
                Ok(None)
            } else {
                Ok(Some(emit(
                    indicator,
                    snapshot,
                    indicator.missing_data_priority,
                    format!("{} not recorded", field.display_name()),
                    recording_step(*field).to_string(),
                )))
            }
        }

        Check::FieldCategorical { field, accepted } => {
            match categorical_value(indicator, *field, snapshot)? {
                None => Ok(Some(emit(
                    indicator,
                    snapshot,
                    indicator.missing_data_priority,
                    format!("{} not recorded", field.display_name()),
                    recording_step(*field).to_string(),
                ))),
                Some(value) => {
                    if accepted.iter().any(|a| a.eq_ignore_ascii_case(value)) {
                        Ok(None)
                    } else {
                        Ok(Some(emit(
                            indicator,
                            snapshot,
                            Priority::High,
                            format!("{} recorded as '{value}'", field.display_name()),
                            recording_step(*field).to_string(),
                        )))
                    }
                }
            }
        }

        Check::MetricRecorded { metric } => {
            if latest_value(&snapshot.id, *metric, observations).is_some() {
                Ok(None)
            } else {
                Ok(Some(emit(
                    indicator,
                    snapshot,
                    indicator.missing_data_priority,
                    format!("No {metric} recorded"),
                    format!("Capture {metric} at the next contact"),
                )))
            }
        }

        Check::Anticoagulation {
            min_score,
            drug_terms,
        } => match snapshot.cha2ds2_vasc_score {
            None => Ok(Some(emit(
                indicator,
                snapshot,
                indicator.missing_data_priority,
                "CHA2DS2-VASc score not recorded".to_string(),
                "Calculate and record CHA2DS2-VASc score".to_string(),
            ))),
            Some(score) if score < *min_score => Ok(None),
            Some(score) => {
                if ctx.matcher().matches(&snapshot.medications, drug_terms) {
                    Ok(None)
                } else {
                    Ok(Some(emit(
                        indicator,
                        snapshot,
                        Priority::Critical,
                        format!(
                            "CHA2DS2-VASc score {score} with no anticoagulant prescribed"
                        ),
                        "Urgent medication review for anticoagulation".to_string(),
                    )))
                }
            }
        },

        Check::ReviewWithin {
            months,
            overdue_priority,
        } => match snapshot.last_review {
            None => Ok(Some(emit(
                indicator,
                snapshot,
                indicator.missing_data_priority,
                "No clinical review recorded".to_string(),
                "Book clinical review".to_string(),
            ))),
            Some(last_review) => {
                let Some(cutoff) = ctx
                    .as_of()
                    .checked_sub_months(chrono::Months::new(*months))
                else {
                    return Ok(None);
                };
                if last_review >= cutoff {
                    Ok(None)
                } else {
                    Ok(Some(emit(
                        indicator,
                        snapshot,
                        *overdue_priority,
                        format!(
                            "Last review on {last_review} is more than {months} months ago"
                        ),
                        "Book review appointment".to_string(),
                    )))
                }
            }
        },
    }
}

fn emit(
    indicator: &Indicator,
    snapshot: &PatientSnapshot,
    priority: Priority,
    reason: String,
    action_required: String,
) -> ClinicalAction {
    ClinicalAction {
        patient_id: snapshot.id.clone(),
        indicator_id: indicator.id.clone(),
        code: indicator.code.clone(),
        category: indicator.category,
        priority,
        reason,
        action_required,
        due_within: indicator.due.window(priority),
    }
}

/// Read a categorical snapshot field
///
/// A categorical check against a numeric field is a catalog
/// misconfiguration; it raises [`EvalError::ThresholdTypeMismatch`]
/// rather than coercing.
fn categorical_value<'s>(
    indicator: &Indicator,
    field: SnapshotField,
    snapshot: &'s PatientSnapshot,
) -> EvalResult<Option<&'s str>> {
    match field {
        SnapshotField::Dnacpr => Ok(snapshot.dnacpr_status.as_deref()),
        other => Err(EvalError::threshold_type_mismatch(
            indicator.id.clone(),
            format!("non-categorical field {}", other.display_name()),
        )),
    }
}

fn recording_step(field: SnapshotField) -> &'static str {
    match field {
        SnapshotField::Hba1c => "Arrange blood test for HbA1c",
        SnapshotField::Ldl | SnapshotField::Hdl => "Arrange lipid profile blood test",
        SnapshotField::Cha2ds2Vasc => "Calculate and record CHA2DS2-VASc score",
        SnapshotField::Frailty => "Complete frailty assessment",
        SnapshotField::Dnacpr => "Discuss and record DNACPR decision",
        SnapshotField::LastReview => "Book clinical review",
    }
}
