use crate::core::filter::{filter_violation, OutputMode};
use crate::error::Result;
use crate::models::{PerTestReport, ReportFields, ViolationRecord};
use crate::output::console::render_violation_table;
use crate::utils::fs::write_json_pretty;
use crate::utils::timestamp::{filename_timestamp, iso_timestamp};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::debug;

pub const PER_TEST_PREFIX: &str = "accessibility-report-";

/// Writes one timestamped report file per accessibility scan. Many test
/// workers may share one output directory; the millisecond timestamp in each
/// file name keeps their writes apart.
#[derive(Debug, Clone)]
pub struct PerTestReporter {
    output_dir: PathBuf,
    console_fields: Option<ReportFields>,
}

impl PerTestReporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            console_fields: None,
        }
    }

    pub fn with_console(mut self, fields: Option<ReportFields>) -> Self {
        self.console_fields = fields;
        self
    }

    pub fn record(&self, violations: &[ViolationRecord], url: Option<&str>) -> Result<PathBuf> {
        self.record_at(violations, url, Utc::now())
    }

    /// Prints the console table (if configured) and persists the file-form
    /// report. Returns the path that was written.
    pub fn record_at(
        &self,
        violations: &[ViolationRecord],
        url: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<PathBuf> {
        if let Some(table) = self.console_table(violations, url) {
            println!("{}", table);
        }

        let report = build_report(violations, url, now);
        let path = self
            .output_dir
            .join(format!("{}{}.json", PER_TEST_PREFIX, filename_timestamp(now)));

        write_json_pretty(&path, &report)?;
        debug!(
            "Wrote {} violation(s) to {}",
            report.violations.len(),
            path.display()
        );

        Ok(path)
    }

    /// `None` when console output is off or there is nothing to show.
    pub fn console_table(&self, violations: &[ViolationRecord], url: Option<&str>) -> Option<String> {
        let fields = self.console_fields.as_ref()?;
        if violations.is_empty() {
            return None;
        }

        let mut rows: Vec<_> = violations
            .iter()
            .map(|v| filter_violation(v, fields, OutputMode::Console))
            .collect();
        rows.sort_by_key(|row| row.impact.as_ref().map_or(u8::MAX, |i| i.rank()));

        let mut out = String::new();
        if let Some(url) = url {
            out.push_str(&format!("URL: {}\n", url));
        }
        out.push_str(&render_violation_table(&rows, fields));
        Some(out)
    }
}

/// File-form projection: every field on, regardless of the console set,
/// each entry tagged with the page it came from.
pub fn build_report(
    violations: &[ViolationRecord],
    url: Option<&str>,
    now: DateTime<Utc>,
) -> PerTestReport {
    let fields = ReportFields::all();
    let violations = violations
        .iter()
        .map(|v| {
            let mut filtered = filter_violation(v, &fields, OutputMode::File);
            filtered.url = url.map(str::to_string);
            filtered
        })
        .collect();

    PerTestReport {
        violations,
        timestamp: iso_timestamp(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::violation::NodeResult;
    use crate::models::Impact;
    use chrono::TimeZone;
    use serde_json::Value;

    fn violation(id: &str, impact: Impact, selectors: &[&str]) -> ViolationRecord {
        ViolationRecord {
            id: id.to_string(),
            impact,
            description: Some(format!("{} description", id)),
            help: Some(format!("{} help", id)),
            help_url: Some(format!("https://dequeuniversity.com/rules/axe/4.8/{}", id)),
            tags: Some(vec!["wcag2a".to_string()]),
            nodes: Some(selectors.iter().map(|s| NodeResult::from_selectors(&[s])).collect()),
        }
    }

    #[test]
    fn test_record_writes_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let reports = dir.path().join("nested/accessibility-reports");
        let reporter = PerTestReporter::new(&reports);
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let path = reporter
            .record_at(
                &[violation("image-alt", Impact::Critical, &["img.hero"])],
                Some("https://example.com/"),
                now,
            )
            .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "accessibility-report-2024-01-02T03-04-05-000Z.json"
        );

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["timestamp"], "2024-01-02T03:04:05.000Z");
        let entry = &written["violations"][0];
        assert_eq!(entry["id"], "image-alt");
        assert_eq!(entry["impact"], "critical");
        assert_eq!(entry["nodes"][0], "img.hero");
        assert_eq!(entry["url"], "https://example.com/");
        assert!(entry["helpUrl"].is_string());
    }

    #[test]
    fn test_file_form_ignores_console_fields() {
        let report = build_report(
            &[violation("list", Impact::Minor, &["ul", "ol"])],
            None,
            Utc::now(),
        );
        let entry = &report.violations[0];

        assert!(entry.description.is_some());
        assert!(entry.url.is_none());
        assert_eq!(
            entry.nodes,
            Some(crate::models::NodeSummary::Selectors(vec![
                "ul".to_string(),
                "ol".to_string()
            ]))
        );
    }

    #[test]
    fn test_console_table_sorted_by_severity() {
        let reporter = PerTestReporter::new("unused").with_console(Some(ReportFields::console_default()));
        let table = reporter
            .console_table(
                &[
                    violation("region", Impact::Moderate, &["div"]),
                    violation("label", Impact::Critical, &["input"]),
                ],
                Some("/careers"),
            )
            .unwrap();

        assert!(table.starts_with("URL: /careers\n"));
        let label_at = table.find("label").unwrap();
        let region_at = table.find("region").unwrap();
        assert!(label_at < region_at);
    }

    #[test]
    fn test_console_table_off_without_fields() {
        let reporter = PerTestReporter::new("unused");
        assert!(reporter
            .console_table(&[violation("label", Impact::Critical, &["input"])], None)
            .is_none());
    }
}
