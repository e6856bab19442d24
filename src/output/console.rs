use crate::core::performance::PerformanceAnalysis;
use crate::models::{FilteredViolation, Impact, NodeSummary, ReportField, ReportFields};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

fn cell(row: &FilteredViolation, field: ReportField) -> String {
    match field {
        ReportField::Impact => row
            .impact
            .as_ref()
            .map(|i| match i {
                Impact::Unset => String::new(),
                other => other.to_string(),
            })
            .unwrap_or_default(),
        ReportField::Id => row.id.clone().unwrap_or_default(),
        ReportField::Description => row.description.clone().unwrap_or_default(),
        ReportField::Help => row.help.clone().unwrap_or_default(),
        ReportField::HelpUrl => row.help_url.clone().unwrap_or_default(),
        ReportField::Tags => row.tags.as_ref().map(|t| t.join(", ")).unwrap_or_default(),
        ReportField::Nodes => match &row.nodes {
            Some(NodeSummary::Count(n)) => n.to_string(),
            Some(NodeSummary::Selectors(s)) => s.join(", "),
            None => String::new(),
        },
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// An index column followed by one column per enabled field.
pub fn violation_table(rows: &[FilteredViolation], fields: &ReportFields) -> Table {
    let columns: Vec<ReportField> = fields.enabled().collect();

    let mut table = new_table();
    let mut header = vec!["(index)"];
    header.extend(columns.iter().map(|c| c.name()));
    table.set_header(header);

    for (i, row) in rows.iter().enumerate() {
        let mut cells = vec![i.to_string()];
        cells.extend(columns.iter().map(|c| cell(row, *c)));
        table.add_row(cells);
    }
    table
}

pub fn render_violation_table(rows: &[FilteredViolation], fields: &ReportFields) -> String {
    violation_table(rows, fields).to_string()
}

/// "best-practices" -> "Best practices"
pub fn format_category_name(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().replacen('-', " ", 1),
        None => String::new(),
    }
}

pub fn render_performance_header(url: &str, analysis: &PerformanceAnalysis) -> String {
    if analysis.has_failed() {
        format!(
            "❌ Performance Test FAILED for: {} with {} issue(s)",
            url,
            analysis.failures.len()
        )
        .red()
        .to_string()
    } else {
        format!("✅ Performance Test PASSED for: {}", url)
            .green()
            .to_string()
    }
}

/// One row per evaluated category, green when it passed and red otherwise.
pub fn performance_table(analysis: &PerformanceAnalysis) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Status", "Category", "Score", "Threshold"]);

    for (category, result) in &analysis.results {
        let (status, color) = if result.passed {
            ("PASS", Color::Green)
        } else {
            ("FAIL", Color::Red)
        };
        table.add_row(vec![
            Cell::new(status).fg(color),
            Cell::new(format_category_name(category)).fg(color),
            Cell::new(format!("{}%", result.actual)).fg(color),
            Cell::new(format!("{}%", result.threshold)).fg(color),
        ]);
    }
    table
}

pub fn render_performance_table(url: &str, analysis: &PerformanceAnalysis) -> String {
    format!(
        "\n{}\n\n{}",
        render_performance_header(url, analysis),
        performance_table(analysis)
    )
}
