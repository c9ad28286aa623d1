//! Built-in indicator catalog
//!
//! The default catalog shipped with the engine, covering the QOF
//! indicators the practice dashboards report on. Callers that need a
//! practice-specific catalog load one from JSON instead; this one is the
//! canonical baseline.

use crate::catalog::IndicatorCatalog;
use crate::indicator::{Applicability, Check, DuePolicy, Indicator};
use carelink_qof_types::vocabulary::terms;
use carelink_qof_types::{Category, DueWithin, Frailty, MetricType, Priority, SnapshotField};
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;

/// Catalog version identifier for the built-in set
pub const BUILTIN_VERSION: &str = "2025.1";

static BUILTIN: Lazy<IndicatorCatalog> = Lazy::new(|| {
    IndicatorCatalog::new(BUILTIN_VERSION, builtin_indicators())
        .expect("built-in catalog must validate")
});

/// The built-in indicator catalog
pub fn builtin_catalog() -> &'static IndicatorCatalog {
    &BUILTIN
}

fn builtin_indicators() -> Vec<Indicator> {
    vec![
        Indicator {
            id: "hyp008".into(),
            code: "HYP008".into(),
            name: "Blood pressure control in hypertension".into(),
            category: Category::Cardiovascular,
            applicability: Applicability::HasCondition {
                terms: terms(["hypertension"]),
            },
            target_percent: 77,
            points: 16,
            check: Check::BloodPressureControl {
                systolic_max: dec!(140),
                diastolic_max: dec!(90),
                relaxed_systolic_max: dec!(150),
                relaxed_diastolic_max: dec!(90),
                relaxed_from_age: 80,
            },
            missing_data_priority: Priority::High,
            due: DuePolicy {
                high: DueWithin::FourteenDays,
                ..DuePolicy::default()
            },
        },
        Indicator {
            id: "dm012".into(),
            code: "DM012".into(),
            name: "HbA1c control in type 2 diabetes".into(),
            category: Category::Diabetes,
            applicability: Applicability::HasCondition {
                terms: terms(["type 2 diabetes", "type ii diabetes", "t2dm"]),
            },
            target_percent: 71,
            points: 17,
            check: Check::Hba1cControl {
                standard_max: dec!(58),
                frail_max: dec!(75),
                frail_from: Frailty::Moderate,
                critical_above: dec!(86),
            },
            missing_data_priority: Priority::High,
            due: DuePolicy {
                high: DueWithin::SevenDays,
                ..DuePolicy::default()
            },
        },
        Indicator {
            id: "dm014".into(),
            code: "DM014".into(),
            name: "Annual HbA1c recording in diabetes".into(),
            category: Category::Diabetes,
            applicability: Applicability::HasCondition {
                terms: terms(["diabetes"]),
            },
            target_percent: 90,
            points: 6,
            check: Check::FieldRecorded {
                field: SnapshotField::Hba1c,
            },
            missing_data_priority: Priority::Medium,
            due: DuePolicy::default(),
        },
        Indicator {
            id: "af007".into(),
            code: "AF007".into(),
            name: "Anticoagulation in atrial fibrillation".into(),
            category: Category::Cardiovascular,
            applicability: Applicability::HasCondition {
                terms: terms(["atrial fibrillation", "afib"]),
            },
            target_percent: 87,
            points: 12,
            check: Check::Anticoagulation {
                min_score: 2,
                drug_terms: terms([
                    "apixaban",
                    "rivaroxaban",
                    "edoxaban",
                    "dabigatran",
                    "warfarin",
                ]),
            },
            missing_data_priority: Priority::High,
            due: DuePolicy {
                critical: DueWithin::ThreeDays,
                ..DuePolicy::default()
            },
        },
        Indicator {
            id: "chol003".into(),
            code: "CHOL003".into(),
            name: "Lipid profile recording in cardiovascular disease".into(),
            category: Category::Cardiovascular,
            applicability: Applicability::Any {
                rules: vec![
                    Applicability::HasCondition {
                        terms: terms([
                            "coronary heart disease",
                            "ischaemic heart disease",
                            "myocardial infarction",
                            "peripheral arterial disease",
                            "stroke",
                            "transient ischaemic attack",
                        ]),
                    },
                    Applicability::OnMedication {
                        terms: terms(["atorvastatin", "simvastatin", "rosuvastatin"]),
                    },
                ],
            },
            target_percent: 85,
            points: 14,
            check: Check::FieldRecorded {
                field: SnapshotField::Ldl,
            },
            missing_data_priority: Priority::Medium,
            due: DuePolicy::default(),
        },
        Indicator {
            id: "smok004".into(),
            code: "SMOK004".into(),
            name: "Smoking status recording".into(),
            category: Category::Lifestyle,
            applicability: Applicability::MinAge { years: 15 },
            target_percent: 90,
            points: 8,
            check: Check::MetricRecorded {
                metric: MetricType::SmokingStatus,
            },
            missing_data_priority: Priority::Low,
            due: DuePolicy::default(),
        },
        Indicator {
            id: "copd010".into(),
            code: "COPD010".into(),
            name: "Annual COPD review".into(),
            category: Category::Respiratory,
            applicability: Applicability::HasCondition {
                terms: terms(["copd", "chronic obstructive pulmonary disease"]),
            },
            target_percent: 80,
            points: 9,
            check: Check::ReviewWithin {
                months: 12,
                overdue_priority: Priority::Medium,
            },
            missing_data_priority: Priority::Medium,
            due: DuePolicy::default(),
        },
        Indicator {
            id: "mh007".into(),
            code: "MH007".into(),
            name: "Annual physical health check in severe mental illness".into(),
            category: Category::MentalHealth,
            applicability: Applicability::HasCondition {
                terms: terms(["schizophrenia", "bipolar", "psychosis"]),
            },
            target_percent: 75,
            points: 10,
            check: Check::ReviewWithin {
                months: 12,
                overdue_priority: Priority::High,
            },
            missing_data_priority: Priority::High,
            due: DuePolicy::default(),
        },
        Indicator {
            id: "hf003".into(),
            code: "HF003".into(),
            name: "Annual heart failure review".into(),
            category: Category::HeartFailure,
            applicability: Applicability::HasCondition {
                terms: terms(["heart failure", "lvsd"]),
            },
            target_percent: 80,
            points: 7,
            check: Check::ReviewWithin {
                months: 12,
                overdue_priority: Priority::High,
            },
            missing_data_priority: Priority::High,
            due: DuePolicy::default(),
        },
        Indicator {
            id: "frail005".into(),
            code: "FRAIL005".into(),
            name: "DNACPR decision recorded in severe frailty".into(),
            category: Category::Safety,
            applicability: Applicability::FrailtyAtLeast {
                level: Frailty::Severe,
            },
            target_percent: 70,
            points: 5,
            check: Check::FieldCategorical {
                field: SnapshotField::Dnacpr,
                accepted: terms(["recorded", "declined"]),
            },
            missing_data_priority: Priority::High,
            due: DuePolicy {
                high: DueWithin::FourteenDays,
                ..DuePolicy::default()
            },
        },
        Indicator {
            id: "prev002".into(),
            code: "PREV002".into(),
            name: "Weight recording in patients aged 65 and over".into(),
            category: Category::PreventiveCare,
            applicability: Applicability::MinAge { years: 65 },
            target_percent: 85,
            points: 4,
            check: Check::MetricRecorded {
                metric: MetricType::Weight,
            },
            missing_data_priority: Priority::Low,
            due: DuePolicy::default(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_validates() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.version(), BUILTIN_VERSION);
        assert!(catalog.len() >= 10);
    }

    #[test]
    fn test_builtin_codes_present() {
        let catalog = builtin_catalog();
        for id in ["hyp008", "dm012", "af007", "frail005"] {
            assert!(catalog.get(id).is_some(), "missing builtin indicator {id}");
        }
        assert_eq!(catalog.get("hyp008").unwrap().code, "HYP008");
    }

    #[test]
    fn test_builtin_round_trips_through_json() {
        let catalog = builtin_catalog();
        let json = catalog.to_json_string().unwrap();
        let reloaded = IndicatorCatalog::from_json_str(&json).unwrap();
        assert_eq!(reloaded.len(), catalog.len());
        assert_eq!(reloaded.version(), catalog.version());
    }
}
