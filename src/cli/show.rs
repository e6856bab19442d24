use crate::error::Result;
use crate::models::ConsolidatedReport;
use crate::output::{render_report, ReportFormat};
use crate::utils::fs::read_json;
use std::path::Path;

pub fn handle_show_command(report: &Path, format: Option<String>) {
    let format = match format.as_deref().map(str::parse::<ReportFormat>).transpose() {
        Ok(format) => format.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Acceptable values: md, json, sarif");
            std::process::exit(1);
        }
    };

    match show_report(report, format) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

pub fn show_report(report: &Path, format: ReportFormat) -> Result<String> {
    let report: ConsolidatedReport = read_json(report)?;
    render_report(&report, format)
}
