//! Normalized patient snapshot
//!
//! The snapshot is the read-only view of one patient's clinical state
//! that indicators evaluate against. It is populated by the data store
//! and never mutated by the engine. Every clinical field is optional:
//! an absent field means "not recorded", which is itself a first-class
//! evaluation outcome.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque patient identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(pub String);

impl PatientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PatientId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Categorical frailty assessment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Frailty {
    Mild,
    Moderate,
    Severe,
}

impl Frailty {
    /// Check whether this assessment is at least as severe as `level`
    pub fn is_at_least(self, level: Frailty) -> bool {
        self >= level
    }
}

impl fmt::Display for Frailty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mild => write!(f, "mild"),
            Self::Moderate => write!(f, "moderate"),
            Self::Severe => write!(f, "severe"),
        }
    }
}

/// Normalized view of one patient's clinical state
///
/// Condition and medication lists are free text as recorded in the
/// source system; matching against the indicator vocabulary happens via
/// [`crate::VocabularyMatcher`], never by direct equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSnapshot {
    /// Opaque patient identifier
    pub id: PatientId,
    /// Date of birth, used only to derive age
    pub date_of_birth: Option<NaiveDate>,
    /// Free-text condition list
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Free-text medication list
    #[serde(default)]
    pub medications: Vec<String>,
    /// Most recent HbA1c in mmol/mol
    pub hba1c_mmol_mol: Option<Decimal>,
    /// Date the HbA1c was recorded
    pub hba1c_recorded_on: Option<NaiveDate>,
    /// Most recent LDL cholesterol in mmol/L
    pub ldl_mmol_l: Option<Decimal>,
    /// Most recent HDL cholesterol in mmol/L
    pub hdl_mmol_l: Option<Decimal>,
    /// CHA2DS2-VASc stroke-risk score
    pub cha2ds2_vasc_score: Option<u8>,
    /// Frailty assessment
    pub frailty: Option<Frailty>,
    /// DNACPR decision status as recorded (e.g. "recorded", "declined",
    /// "not discussed")
    pub dnacpr_status: Option<String>,
    /// Date of the last clinical review
    pub last_review: Option<NaiveDate>,
}

impl PatientSnapshot {
    /// Create an empty snapshot for a patient
    pub fn new(id: impl Into<PatientId>) -> Self {
        Self {
            id: id.into(),
            date_of_birth: None,
            conditions: Vec::new(),
            medications: Vec::new(),
            hba1c_mmol_mol: None,
            hba1c_recorded_on: None,
            ldl_mmol_l: None,
            hdl_mmol_l: None,
            cha2ds2_vasc_score: None,
            frailty: None,
            dnacpr_status: None,
            last_review: None,
        }
    }

    /// Age in whole years on the given date, if date of birth is known
    ///
    /// Returns `None` for an unknown date of birth or a date of birth in
    /// the future relative to `as_of`; age is never guessed.
    pub fn age_on(&self, as_of: NaiveDate) -> Option<u32> {
        let dob = self.date_of_birth?;
        as_of.years_since(dob)
    }

    /// Check whether the patient's frailty is at least the given level
    pub fn frailty_at_least(&self, level: Frailty) -> bool {
        self.frailty.is_some_and(|f| f.is_at_least(level))
    }
}

impl From<String> for PatientId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Discrete snapshot fields an indicator can require to be recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotField {
    Hba1c,
    Ldl,
    Hdl,
    Cha2ds2Vasc,
    Frailty,
    Dnacpr,
    LastReview,
}

impl SnapshotField {
    /// Whether the field carries a value in the given snapshot
    pub fn is_recorded(self, snapshot: &PatientSnapshot) -> bool {
        match self {
            Self::Hba1c => snapshot.hba1c_mmol_mol.is_some(),
            Self::Ldl => snapshot.ldl_mmol_l.is_some(),
            Self::Hdl => snapshot.hdl_mmol_l.is_some(),
            Self::Cha2ds2Vasc => snapshot.cha2ds2_vasc_score.is_some(),
            Self::Frailty => snapshot.frailty.is_some(),
            Self::Dnacpr => snapshot.dnacpr_status.is_some(),
            Self::LastReview => snapshot.last_review.is_some(),
        }
    }

    /// Human-readable field name for reason strings
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Hba1c => "HbA1c",
            Self::Ldl => "LDL cholesterol",
            Self::Hdl => "HDL cholesterol",
            Self::Cha2ds2Vasc => "CHA2DS2-VASc score",
            Self::Frailty => "frailty assessment",
            Self::Dnacpr => "DNACPR decision",
            Self::LastReview => "clinical review date",
        }
    }
}
