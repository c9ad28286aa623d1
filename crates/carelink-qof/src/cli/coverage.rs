//! Coverage command implementation

use super::output;
use anyhow::{Context, Result};
use carelink_qof_eval::{CoverageReport, CoverageStatus, IndicatorCounts};
use colored::*;
use std::fs;
use std::path::PathBuf;

/// Configuration for coverage command
pub struct CoverageConfig {
    pub counts: PathBuf,
    pub catalog: Option<PathBuf>,
    pub output_format: Option<String>,
    pub output_file: Option<PathBuf>,
}

/// Build and print a coverage report from population counts
pub async fn coverage(config: CoverageConfig) -> Result<()> {
    let catalog = super::load_catalog(config.catalog.as_deref())?;

    let content = fs::read_to_string(&config.counts)
        .with_context(|| format!("Failed to read counts file: {}", config.counts.display()))?;
    let counts: Vec<IndicatorCounts> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse counts file: {}", config.counts.display()))?;

    let report = crate::coverage_report(&catalog, &counts).context("Failed to build report")?;

    let format = output::OutputFormat::from_str(config.output_format.as_deref().unwrap_or("text"));
    match format {
        output::OutputFormat::Text => {
            output::write_output(&render_text(&report), config.output_file.as_deref())
        }
        _ => {
            let value = serde_json::to_value(&report).context("Failed to serialize report")?;
            output::print_output(&value, format, config.output_file.as_deref())
        }
    }
}

fn render_text(report: &CoverageReport) -> String {
    let mut lines = vec![format!("Catalog {}", report.catalog_version)];

    for entry in &report.entries {
        let status = match entry.status {
            CoverageStatus::Good => "good".green(),
            CoverageStatus::Warning => "warning".yellow(),
            CoverageStatus::Poor => "poor".red(),
        };
        lines.push(format!(
            "{:<10} {:>3}% of {:>3}% target  {status}  (gap {})",
            entry.code, entry.percent, entry.target_percent, entry.gap
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "{} of {} QOF points earned",
        report.total_points_earned, report.total_points_available
    ));
    lines.join("\n")
}
