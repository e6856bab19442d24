pub mod console;
pub mod markdown;
pub mod sarif;

use crate::error::{ReportError, Result};
use crate::models::ConsolidatedReport;
use crate::output::markdown::render_markdown;
use crate::utils::timestamp::local_display;
use chrono::Local;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    #[default]
    Markdown,
    Sarif,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "md" | "markdown" => Ok(ReportFormat::Markdown),
            "sarif" => Ok(ReportFormat::Sarif),
            _ => Err(format!("Invalid report format: {}", s)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "Json"),
            ReportFormat::Markdown => write!(f, "Markdown"),
            ReportFormat::Sarif => write!(f, "Sarif"),
        }
    }
}

/// Render a consolidated report in `format` for printing to stdout.
pub fn render_report(report: &ConsolidatedReport, format: ReportFormat) -> Result<String> {
    let to_json = |e: serde_json::Error| ReportError::InvalidInput(format!("Failed to serialize report: {}", e));
    match format {
        ReportFormat::Json => serde_json::to_string_pretty(report).map_err(to_json),
        ReportFormat::Markdown => Ok(render_markdown(
            &report.violations,
            &local_display(Local::now()),
        )),
        ReportFormat::Sarif => {
            serde_json::to_string_pretty(&sarif::generate_sarif_report(&report.violations))
                .map_err(to_json)
        }
    }
}
