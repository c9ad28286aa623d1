//! Indicator records and their declarative rule components

use carelink_qof_types::{
    Category, DueWithin, Frailty, MetricType, PatientSnapshot, Priority, SnapshotField, TermList,
    VocabularyMatcher,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Applicability predicate over a patient snapshot
///
/// Predicates are pure and side-effect free; compound forms compose with
/// `All`/`Any`. An unknown field (e.g. no date of birth for a `MinAge`
/// rule) never satisfies a predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Applicability {
    /// Condition list mentions any of the terms
    HasCondition { terms: TermList },
    /// Medication list mentions any of the terms
    OnMedication { terms: TermList },
    /// Age on the evaluation date is at least `years`
    MinAge { years: u32 },
    /// Frailty assessment is at least the given level
    FrailtyAtLeast { level: Frailty },
    /// All sub-rules hold
    All { rules: Vec<Applicability> },
    /// Any sub-rule holds
    Any { rules: Vec<Applicability> },
}

impl Applicability {
    /// Evaluate the predicate against a snapshot
    pub fn matches(
        &self,
        snapshot: &PatientSnapshot,
        as_of: NaiveDate,
        matcher: &dyn VocabularyMatcher,
    ) -> bool {
        match self {
            Self::HasCondition { terms } => matcher.matches(&snapshot.conditions, terms),
            Self::OnMedication { terms } => matcher.matches(&snapshot.medications, terms),
            Self::MinAge { years } => snapshot
                .age_on(as_of)
                .is_some_and(|age| age >= *years),
            Self::FrailtyAtLeast { level } => snapshot.frailty_at_least(*level),
            Self::All { rules } => rules
                .iter()
                .all(|rule| rule.matches(snapshot, as_of, matcher)),
            Self::Any { rules } => rules
                .iter()
                .any(|rule| rule.matches(snapshot, as_of, matcher)),
        }
    }

    /// Walk the predicate tree looking for empty term or rule lists
    pub(crate) fn has_empty_list(&self) -> bool {
        match self {
            Self::HasCondition { terms } | Self::OnMedication { terms } => terms.is_empty(),
            Self::MinAge { .. } | Self::FrailtyAtLeast { .. } => false,
            Self::All { rules } | Self::Any { rules } => {
                rules.is_empty() || rules.iter().any(Self::has_empty_list)
            }
        }
    }
}

/// Per-patient check an indicator performs once applicability holds
///
/// Each variant carries its own threshold data; age- and
/// frailty-dependent variants are resolved before any comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Check {
    /// Latest blood pressure within limits; the relaxed limits apply
    /// from `relaxed_from_age`
    BloodPressureControl {
        systolic_max: Decimal,
        diastolic_max: Decimal,
        relaxed_systolic_max: Decimal,
        relaxed_diastolic_max: Decimal,
        relaxed_from_age: u32,
    },
    /// HbA1c within limit, with a relaxed limit from a frailty level
    /// and critical escalation above `critical_above`
    Hba1cControl {
        standard_max: Decimal,
        frail_max: Decimal,
        frail_from: Frailty,
        critical_above: Decimal,
    },
    /// A discrete snapshot field must be recorded
    FieldRecorded { field: SnapshotField },
    /// A categorical snapshot field must be recorded with one of the
    /// accepted values (case-insensitive)
    FieldCategorical {
        field: SnapshotField,
        accepted: TermList,
    },
    /// A metric must have been observed at least once
    MetricRecorded { metric: MetricType },
    /// Anticoagulant prescribed when CHA2DS2-VASc is at least `min_score`
    Anticoagulation {
        min_score: u8,
        drug_terms: TermList,
    },
    /// Clinical review within the last `months` months
    ReviewWithin {
        months: u32,
        /// Priority of an action for a review that is on record but stale
        #[serde(default = "default_overdue_priority")]
        overdue_priority: Priority,
    },
}

impl Check {
    pub(crate) fn has_empty_list(&self) -> bool {
        match self {
            Self::FieldCategorical { accepted, .. } => accepted.is_empty(),
            Self::Anticoagulation { drug_terms, .. } => drug_terms.is_empty(),
            _ => false,
        }
    }
}

/// Mapping from action priority to recommended action window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuePolicy {
    pub critical: DueWithin,
    pub high: DueWithin,
    pub medium: DueWithin,
    pub low: DueWithin,
}

impl DuePolicy {
    /// Action window for a priority
    pub fn window(&self, priority: Priority) -> DueWithin {
        match priority {
            Priority::Critical => self.critical,
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

impl Default for DuePolicy {
    fn default() -> Self {
        Self {
            critical: DueWithin::TwentyFourHours,
            high: DueWithin::SevenDays,
            medium: DueWithin::OneMonth,
            low: DueWithin::ThreeMonths,
        }
    }
}

fn default_missing_data_priority() -> Priority {
    // Failure to record is itself a quality gap
    Priority::High
}

fn default_overdue_priority() -> Priority {
    Priority::Medium
}

/// One clinical quality indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    /// Stable identifier, unique within a catalog
    pub id: String,
    /// External-facing QOF code (e.g. "HYP008")
    pub code: String,
    /// Human-readable name
    pub name: String,
    /// Clinical domain
    pub category: Category,
    /// Who the indicator applies to
    pub applicability: Applicability,
    /// Population-level attainment target, 0-100
    pub target_percent: u8,
    /// QOF points available for full attainment
    pub points: u8,
    /// The per-patient check
    pub check: Check,
    /// Priority of a "not recorded" action
    #[serde(default = "default_missing_data_priority")]
    pub missing_data_priority: Priority,
    /// Priority-to-window mapping for emitted actions
    #[serde(default)]
    pub due: DuePolicy,
}
