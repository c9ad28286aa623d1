//! Output formatting utilities

use anyhow::{Context, Result};
use carelink_qof_types::Priority;
use colored::*;
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    JsonPretty,
    Text,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" | "json-pretty" => Self::JsonPretty,
            "text" => Self::Text,
            _ => Self::Text, // default
        }
    }
}

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => {
            // Auto-detect based on terminal
            if std::env::var("TERM").is_ok() {
                colored::control::set_override(true);
            } else {
                colored::control::set_override(false);
            }
        }
    }
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {error:#}", "Error:".red().bold())
}

/// Format a warning for display
pub fn format_warning(warning: &str) -> String {
    format!("{} {warning}", "Warning:".yellow().bold())
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {message}", "Success:".green().bold())
}

/// Colored label for an action priority
pub fn format_priority(priority: Priority) -> ColoredString {
    match priority {
        Priority::Critical => "CRITICAL".red().bold(),
        Priority::High => "HIGH".yellow().bold(),
        Priority::Medium => "MEDIUM".cyan(),
        Priority::Low => "LOW".normal(),
    }
}

/// Write output to a file or stdout
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        eprintln!(
            "{}",
            format_success(&format!("Output written to {}", path.display()))
        );
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format JSON value for output
pub fn format_json(value: &Value, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize JSON")
    } else {
        serde_json::to_string(value).context("Failed to serialize JSON")
    }
}

/// Print a JSON value in the requested format
///
/// `Text` callers render their own report and go through
/// [`write_output`] directly; this falls back to pretty JSON.
pub fn print_output(value: &Value, format: OutputFormat, output_file: Option<&Path>) -> Result<()> {
    let content = match format {
        OutputFormat::Json => format_json(value, false)?,
        OutputFormat::JsonPretty | OutputFormat::Text => format_json(value, true)?,
    };
    write_output(&content, output_file)
}
