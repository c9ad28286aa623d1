//! Scan command implementation

use super::output;
use anyhow::{Context, Result};
use carelink_qof_eval::{AggregateOutcome, Aggregator, EvaluationContext, PatientCase};
use carelink_qof_model::InMemoryStore;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

/// Configuration for scan command
pub struct ScanConfig {
    pub patients: PathBuf,
    pub catalog: Option<PathBuf>,
    pub as_of: Option<NaiveDate>,
    pub verbose: bool,
    pub output_format: Option<String>,
    pub output_file: Option<PathBuf>,
}

/// Run a population scan and print the prioritized action list
pub async fn scan(config: ScanConfig) -> Result<()> {
    let catalog = super::load_catalog(config.catalog.as_deref())?;

    if config.verbose {
        eprintln!(
            "Loaded catalog {} with {} indicators",
            catalog.version(),
            catalog.len()
        );
    }

    let content = fs::read_to_string(&config.patients)
        .with_context(|| format!("Failed to read patients file: {}", config.patients.display()))?;
    let cases: Vec<PatientCase> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse patients file: {}", config.patients.display()))?;

    // Stage everything through the store so the scan sees exactly what a
    // store-backed deployment would
    let store = InMemoryStore::new();
    for case in cases {
        store.upsert_snapshot(case.snapshot);
        for observation in case.observations {
            store.record_observation(observation);
        }
    }

    if config.verbose {
        eprintln!("Staged {} patients", store.patient_count());
    }

    let cases = crate::collect_cases(&store, &store)
        .await
        .context("Failed to collect patient cases")?;

    let as_of = config
        .as_of
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let aggregator = Aggregator::new(catalog, EvaluationContext::new(as_of));
    let outcome = aggregator.aggregate(&cases);

    for skipped in &outcome.skipped {
        eprintln!("{}", skipped.to_diagnostic().render_colored());
    }

    let format = output::OutputFormat::from_str(config.output_format.as_deref().unwrap_or("text"));
    match format {
        output::OutputFormat::Text => {
            output::write_output(&render_text(&outcome), config.output_file.as_deref())
        }
        _ => {
            let value = serde_json::to_value(&outcome).context("Failed to serialize outcome")?;
            output::print_output(&value, format, config.output_file.as_deref())
        }
    }
}

fn render_text(outcome: &AggregateOutcome) -> String {
    let mut lines = Vec::new();

    for action in &outcome.actions {
        lines.push(format!(
            "{:<10} {} [{}] due within {}",
            output::format_priority(action.priority),
            action.patient_id,
            action.code,
            action.due_within
        ));
        lines.push(format!("           {}", action.reason));
        lines.push(format!("           -> {}", action.action_required));
    }

    lines.push(String::new());
    lines.push(format!("{} actions", outcome.summary.total));
    let priorities: Vec<String> = outcome
        .summary
        .by_priority
        .iter()
        .map(|(priority, count)| format!("{priority}: {count}"))
        .collect();
    lines.push(priorities.join(", "));

    lines.join("\n")
}
