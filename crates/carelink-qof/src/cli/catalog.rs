//! Catalog command implementation

use super::output;
use anyhow::{Context, Result};
use carelink_qof_catalog::IndicatorCatalog;
use std::path::PathBuf;

/// Configuration for catalog command
pub struct CatalogConfig {
    pub catalog: Option<PathBuf>,
    pub output_format: Option<String>,
    pub output_file: Option<PathBuf>,
}

/// List the indicators a scan would evaluate
pub async fn catalog(config: CatalogConfig) -> Result<()> {
    let catalog = super::load_catalog(config.catalog.as_deref())?;

    let format = output::OutputFormat::from_str(config.output_format.as_deref().unwrap_or("text"));
    match format {
        output::OutputFormat::Text => {
            output::write_output(&render_text(&catalog), config.output_file.as_deref())
        }
        _ => {
            let json = catalog
                .to_json_string()
                .context("Failed to serialize catalog")?;
            output::write_output(&json, config.output_file.as_deref())
        }
    }
}

fn render_text(catalog: &IndicatorCatalog) -> String {
    let mut lines = vec![format!(
        "Catalog {} ({} indicators)",
        catalog.version(),
        catalog.len()
    )];
    for indicator in catalog.iter() {
        lines.push(format!(
            "{:<10} {}  target {}%  {} points  [{}]",
            indicator.code,
            indicator.name,
            indicator.target_percent,
            indicator.points,
            indicator.category
        ));
    }
    lines.join("\n")
}
