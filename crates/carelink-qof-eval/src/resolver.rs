//! Most-recent observation resolution
//!
//! Observations arrive as an append-only stream of encounter records.
//! The resolver selects the newest record carrying the requested metric;
//! it never mixes fields across records, so a blood pressure reading is
//! only resolved when one record holds both systolic and diastolic.
//! When nothing qualifies the resolver returns `None`, never a sentinel.

use carelink_qof_types::{MetricType, Observation, ObservationValue, PatientId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A resolved single-metric reading
#[derive(Debug, Clone, PartialEq)]
pub struct MetricReading {
    pub metric: MetricType,
    pub value: ObservationValue,
    pub collected_at: DateTime<Utc>,
}

/// A resolved blood pressure reading, both fields from one record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloodPressureReading {
    pub systolic: Decimal,
    pub diastolic: Decimal,
    pub collected_at: DateTime<Utc>,
}

/// Latest non-null value of a metric for one patient
///
/// Selects the maximum `collected_at` among records that belong to the
/// patient and carry the metric. Deterministic for a fixed input list:
/// ties on `collected_at` resolve to the later list position.
pub fn latest_value(
    patient_id: &PatientId,
    metric: MetricType,
    observations: &[Observation],
) -> Option<MetricReading> {
    observations
        .iter()
        .filter(|obs| &obs.patient_id == patient_id)
        .filter_map(|obs| {
            obs.value_of(metric).map(|value| MetricReading {
                metric,
                value,
                collected_at: obs.collected_at,
            })
        })
        .max_by_key(|reading| reading.collected_at)
}

/// Latest blood pressure for one patient
///
/// Only records with both systolic and diastolic qualify; a stream where
/// one call captured systolic and another captured diastolic resolves to
/// `None` rather than a reading stitched from two encounters.
pub fn latest_blood_pressure(
    patient_id: &PatientId,
    observations: &[Observation],
) -> Option<BloodPressureReading> {
    observations
        .iter()
        .filter(|obs| &obs.patient_id == patient_id)
        .filter_map(|obs| {
            obs.blood_pressure()
                .map(|(systolic, diastolic)| BloodPressureReading {
                    systolic,
                    diastolic,
                    collected_at: obs.collected_at,
                })
        })
        .max_by_key(|reading| reading.collected_at)
}
