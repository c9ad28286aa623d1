//! End-to-end tests through the facade API

use async_trait::async_trait;
use carelink_qof::model::{NoOpSource, SnapshotSource, SourceError};
use carelink_qof::types::{Observation, PatientId, PatientSnapshot, Priority};
use carelink_qof::{
    builtin_catalog, collect_cases, coverage_report, load_catalog, Aggregator, EvaluationContext,
    IndicatorCounts, QofError,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use std::io::Write;

#[test]
fn default_catalog_is_the_builtin_set() {
    let catalog = load_catalog(None).unwrap();
    assert_eq!(catalog.version(), builtin_catalog().version());
    assert_eq!(catalog.len(), builtin_catalog().len());
}

#[test]
fn custom_catalog_file_replaces_the_builtin_set() {
    let document = r#"{
        "version": "practice-2025.2",
        "indicators": [
            {
                "id": "bp-check",
                "code": "BP001",
                "name": "Blood pressure control",
                "category": "cardiovascular",
                "applicability": {"kind": "has_condition", "terms": ["hypertension"]},
                "target_percent": 80,
                "points": 10,
                "check": {
                    "kind": "blood_pressure_control",
                    "systolic_max": "140",
                    "diastolic_max": "90",
                    "relaxed_systolic_max": "150",
                    "relaxed_diastolic_max": "90",
                    "relaxed_from_age": 80
                }
            }
        ]
    }"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(document.as_bytes()).unwrap();

    let catalog = load_catalog(Some(file.path())).unwrap();
    assert_eq!(catalog.version(), "practice-2025.2");
    assert_eq!(catalog.len(), 1);
    assert!(catalog.get("bp-check").is_some());
    assert!(catalog.get("hyp008").is_none());
}

#[test]
fn unreadable_catalog_file_is_a_system_error() {
    let err = load_catalog(Some(std::path::Path::new("/nonexistent/catalog.json"))).unwrap_err();
    assert!(err.code().is_system_error());
}

#[test]
fn malformed_catalog_file_is_a_catalog_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{\"version\": \"broken\"").unwrap();

    let err = load_catalog(Some(file.path())).unwrap_err();
    assert!(matches!(err, QofError::Catalog { .. }));
    assert!(err.code().is_catalog_error());
}

#[test]
fn cli_catalog_errors_name_the_file() {
    let err = carelink_qof::cli::load_catalog(Some(std::path::Path::new(
        "/nonexistent/catalog.json",
    )))
    .unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/catalog.json"));
}

#[test]
fn unknown_indicator_in_counts_is_an_evaluation_error() {
    let counts = vec![IndicatorCounts {
        indicator_id: "nope".into(),
        recorded: 1,
        eligible: 1,
    }];
    let err = coverage_report(builtin_catalog(), &counts).unwrap_err();
    assert!(err.code().is_evaluation_error());
    assert!(matches!(
        err,
        QofError::Evaluation {
            indicator_id: Some(ref id),
            ..
        } if id == "nope"
    ));
}

struct OfflineStore;

#[async_trait]
impl SnapshotSource for OfflineStore {
    async fn snapshot(&self, patient_id: &PatientId) -> Result<PatientSnapshot, SourceError> {
        Err(SourceError::not_found(patient_id.clone()))
    }

    async fn all_snapshots(&self) -> Result<Vec<PatientSnapshot>, SourceError> {
        Err(SourceError::Unavailable("store offline".to_string()))
    }
}

#[tokio::test]
async fn unavailable_store_is_a_source_error() {
    let err = collect_cases(&OfflineStore, &NoOpSource::new())
        .await
        .unwrap_err();
    assert!(matches!(err, QofError::Source { .. }));
    assert!(err.code().is_source_error());
}

#[tokio::test]
async fn store_backed_scan_produces_prioritized_actions() {
    use carelink_qof::model::InMemoryStore;

    let store = InMemoryStore::new();

    let mut hypertensive = PatientSnapshot::new("p-1");
    hypertensive.conditions = vec!["Hypertension".to_string()];
    store.upsert_snapshot(hypertensive);

    let mut severe = PatientSnapshot::new("p-2");
    severe.conditions = vec!["Hypertension".to_string()];
    store.upsert_snapshot(severe);
    let mut obs = Observation::new("p-2", "2025-05-28T09:00:00Z".parse().unwrap());
    obs.systolic_mmhg = Some(dec!(190));
    obs.diastolic_mmhg = Some(dec!(100));
    store.record_observation(obs);

    let cases = collect_cases(&store, &store).await.unwrap();
    assert_eq!(cases.len(), 2);

    let ctx = EvaluationContext::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    let aggregator = Aggregator::new(builtin_catalog().clone(), ctx);
    let outcome = aggregator.aggregate(&cases);

    // the severe reading outranks the missing reading
    let hyp: Vec<_> = outcome
        .actions
        .iter()
        .filter(|a| a.indicator_id == "hyp008")
        .collect();
    assert_eq!(hyp.len(), 2);
    assert_eq!(hyp[0].patient_id.as_str(), "p-2");
    assert_eq!(hyp[0].priority, Priority::Critical);
    assert_eq!(hyp[1].patient_id.as_str(), "p-1");
    assert_eq!(hyp[1].priority, Priority::High);
}

#[test]
fn skipped_combinations_render_as_diagnostics() {
    use carelink_qof::catalog::Check;
    use carelink_qof::eval::PatientCase;
    use carelink_qof::types::vocabulary::terms;
    use carelink_qof::types::{Frailty, SnapshotField};
    use carelink_qof::IndicatorCatalog;

    // miswire the frailty indicator so it fails for frail patients
    let mut indicators: Vec<_> = builtin_catalog().iter().cloned().collect();
    for indicator in &mut indicators {
        if indicator.id == "frail005" {
            indicator.check = Check::FieldCategorical {
                field: SnapshotField::Hba1c,
                accepted: terms(["recorded"]),
            };
        }
    }
    let catalog = IndicatorCatalog::new("miswired", indicators).unwrap();

    let mut snapshot = PatientSnapshot::new("p-1");
    snapshot.frailty = Some(Frailty::Severe);
    let cases = vec![PatientCase {
        snapshot,
        observations: Vec::new(),
    }];

    let ctx = EvaluationContext::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    let outcome = Aggregator::new(catalog, ctx).aggregate(&cases);
    assert_eq!(outcome.skipped.len(), 1);

    let rendered = outcome.skipped[0].to_diagnostic().render_colored();
    assert!(rendered.contains("QOF0100"));
    assert!(rendered.contains("frail005"));
    assert!(rendered.contains("p-1"));
}
