//! Clinical scenario tests against the built-in catalog
//!
//! These mirror the triage cases the practice teams sign off on:
//! hypertension with and without readings, frailty-adjusted diabetic
//! targets, and anticoagulation in atrial fibrillation.

use carelink_qof_catalog::builtin_catalog;
use carelink_qof_eval::{evaluate_indicator, EvaluationContext};
use carelink_qof_types::{Frailty, Observation, PatientSnapshot, Priority};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn ctx() -> EvaluationContext {
    EvaluationContext::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
}

fn hypertensive_aged_65() -> PatientSnapshot {
    let mut snapshot = PatientSnapshot::new("p-hyp");
    snapshot.conditions = vec!["Hypertension".to_string()];
    snapshot.date_of_birth = NaiveDate::from_ymd_opt(1960, 3, 10);
    snapshot
}

fn bp_reading(systolic: Decimal, diastolic: Decimal) -> Observation {
    let mut obs = Observation::new("p-hyp", "2025-05-20T10:30:00Z".parse().unwrap());
    obs.systolic_mmhg = Some(systolic);
    obs.diastolic_mmhg = Some(diastolic);
    obs
}

#[test]
fn hypertension_with_no_reading_needs_measurement_within_a_fortnight() {
    let indicator = builtin_catalog().get("hyp008").unwrap();
    let action = evaluate_indicator(&ctx(), indicator, &hypertensive_aged_65(), &[])
        .unwrap()
        .expect("missing reading must produce an action");

    assert_eq!(action.code, "HYP008");
    assert_eq!(action.priority, Priority::High);
    assert_eq!(action.due_within.to_string(), "14 days");
    assert!(action.reason.contains("No blood pressure reading"));
}

#[test]
fn severe_hypertension_is_critical_within_a_day() {
    let indicator = builtin_catalog().get("hyp008").unwrap();
    let readings = vec![bp_reading(dec!(185), dec!(115))];
    let action = evaluate_indicator(&ctx(), indicator, &hypertensive_aged_65(), &readings)
        .unwrap()
        .expect("severe reading must produce an action");

    assert_eq!(action.priority, Priority::Critical);
    assert_eq!(action.due_within.to_string(), "24 hours");
    assert!(action.reason.contains("185/115"));
}

#[test]
fn controlled_hypertension_is_silent() {
    let indicator = builtin_catalog().get("hyp008").unwrap();
    let readings = vec![bp_reading(dec!(132), dec!(78))];
    let result =
        evaluate_indicator(&ctx(), indicator, &hypertensive_aged_65(), &readings).unwrap();
    assert_eq!(result, None);
}

fn frail_diabetic(hba1c: Decimal) -> PatientSnapshot {
    let mut snapshot = PatientSnapshot::new("p-dm");
    snapshot.conditions = vec!["Type 2 diabetes".to_string()];
    snapshot.frailty = Some(Frailty::Severe);
    snapshot.hba1c_mmol_mol = Some(hba1c);
    snapshot
}

#[test]
fn severe_frailty_shifts_the_hba1c_target() {
    let indicator = builtin_catalog().get("dm012").unwrap();

    // 70 is above the standard 58 target but within the frail 75 target
    let result = evaluate_indicator(&ctx(), indicator, &frail_diabetic(dec!(70)), &[]).unwrap();
    assert_eq!(result, None);

    // 80 breaches the frail target but is not yet critical
    let action = evaluate_indicator(&ctx(), indicator, &frail_diabetic(dec!(80)), &[])
        .unwrap()
        .unwrap();
    assert_eq!(action.priority, Priority::High);
    assert!(action.reason.contains("above target 75"));

    // only above 86 does it escalate
    let action = evaluate_indicator(&ctx(), indicator, &frail_diabetic(dec!(90)), &[])
        .unwrap()
        .unwrap();
    assert_eq!(action.priority, Priority::Critical);
}

#[test]
fn af_without_anticoagulation_is_critical_within_three_days() {
    let indicator = builtin_catalog().get("af007").unwrap();
    let mut snapshot = PatientSnapshot::new("p-af");
    snapshot.conditions = vec!["Atrial Fibrillation".to_string()];
    snapshot.cha2ds2_vasc_score = Some(3);
    snapshot.medications = vec!["Paracetamol 500mg".to_string()];

    let action = evaluate_indicator(&ctx(), indicator, &snapshot, &[])
        .unwrap()
        .expect("unanticoagulated AF must produce an action");

    assert_eq!(action.code, "AF007");
    assert_eq!(action.priority, Priority::Critical);
    assert_eq!(action.due_within.to_string(), "3 days");
}

#[test]
fn anticoagulated_af_is_silent() {
    let indicator = builtin_catalog().get("af007").unwrap();
    let mut snapshot = PatientSnapshot::new("p-af");
    snapshot.conditions = vec!["Atrial Fibrillation".to_string()];
    snapshot.cha2ds2_vasc_score = Some(3);
    snapshot.medications = vec!["Apixaban 5mg twice daily".to_string()];

    let result = evaluate_indicator(&ctx(), indicator, &snapshot, &[]).unwrap();
    assert_eq!(result, None);
}
