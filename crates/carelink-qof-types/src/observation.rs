//! Per-encounter observation records
//!
//! One `Observation` is the set of metrics captured in a single
//! encounter (an automated call, a clinic visit). The stream is
//! append-only and time-ordered by `collected_at`; the resolver in the
//! eval crate selects the newest record carrying the metric it needs.

use crate::snapshot::PatientId;
use crate::value::ObservationValue;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enumerated metric types the engine can resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    SystolicBp,
    DiastolicBp,
    Pulse,
    Weight,
    Height,
    SmokingStatus,
    AlcoholUnits,
    CarerFlag,
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SystolicBp => write!(f, "systolic blood pressure"),
            Self::DiastolicBp => write!(f, "diastolic blood pressure"),
            Self::Pulse => write!(f, "pulse"),
            Self::Weight => write!(f, "weight"),
            Self::Height => write!(f, "height"),
            Self::SmokingStatus => write!(f, "smoking status"),
            Self::AlcoholUnits => write!(f, "alcohol units per week"),
            Self::CarerFlag => write!(f, "carer status"),
        }
    }
}

/// One encounter's worth of recorded metrics
///
/// Every metric is optional; a call that only captured blood pressure
/// leaves the rest unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Patient this record belongs to
    pub patient_id: PatientId,
    /// When the metrics were captured
    pub collected_at: DateTime<Utc>,
    /// Systolic blood pressure in mmHg
    pub systolic_mmhg: Option<Decimal>,
    /// Diastolic blood pressure in mmHg
    pub diastolic_mmhg: Option<Decimal>,
    /// Pulse in beats per minute
    pub pulse_bpm: Option<Decimal>,
    /// Weight in kilograms
    pub weight_kg: Option<Decimal>,
    /// Height in centimeters
    pub height_cm: Option<Decimal>,
    /// Smoking status as recorded (e.g. "Never smoked", "Ex-smoker")
    pub smoking_status: Option<String>,
    /// Alcohol consumption in units per week
    pub alcohol_units_per_week: Option<Decimal>,
    /// Whether the patient has a carer
    pub has_carer: Option<bool>,
}

impl Observation {
    /// Create an empty observation for a patient at a point in time
    pub fn new(patient_id: impl Into<PatientId>, collected_at: DateTime<Utc>) -> Self {
        Self {
            patient_id: patient_id.into(),
            collected_at,
            systolic_mmhg: None,
            diastolic_mmhg: None,
            pulse_bpm: None,
            weight_kg: None,
            height_cm: None,
            smoking_status: None,
            alcohol_units_per_week: None,
            has_carer: None,
        }
    }

    /// Value of a single metric in this record, if captured
    pub fn value_of(&self, metric: MetricType) -> Option<ObservationValue> {
        match metric {
            MetricType::SystolicBp => self.systolic_mmhg.map(ObservationValue::Decimal),
            MetricType::DiastolicBp => self.diastolic_mmhg.map(ObservationValue::Decimal),
            MetricType::Pulse => self.pulse_bpm.map(ObservationValue::Decimal),
            MetricType::Weight => self.weight_kg.map(ObservationValue::Decimal),
            MetricType::Height => self.height_cm.map(ObservationValue::Decimal),
            MetricType::SmokingStatus => {
                self.smoking_status.as_ref().map(|s| ObservationValue::text(s.clone()))
            }
            MetricType::AlcoholUnits => {
                self.alcohol_units_per_week.map(ObservationValue::Decimal)
            }
            MetricType::CarerFlag => self.has_carer.map(ObservationValue::Flag),
        }
    }

    /// Systolic and diastolic readings when both were captured in this
    /// record; readings are never mixed across records
    pub fn blood_pressure(&self) -> Option<(Decimal, Decimal)> {
        match (self.systolic_mmhg, self.diastolic_mmhg) {
            (Some(systolic), Some(diastolic)) => Some((systolic, diastolic)),
            _ => None,
        }
    }
}
