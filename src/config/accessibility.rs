use crate::models::ReportFields;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_TAGS: &[&str] = &[
    "wcag2a",
    "wcag2aa",
    "wcag21a",
    "wcag21aa",
    "wcag22aa",
    "section508",
    "best-practice",
];

/// Rules switched off unless a test asks for them. `false` entries are kept
/// so an override can see the rule is known but active.
pub const DEFAULT_IGNORED_RULES: &[(&str, bool)] = &[
    ("color-contrast", false),
    ("aria-input-field-name", true),
    ("nested-interactive", true),
    ("landmark-unique", true),
    ("heading-order", true),
    ("landmark-banner-is-top-level", true),
];

/// Settings for axe scans and the reports they produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessibilityConfig {
    pub tags: Vec<String>,
    pub ignored_rules: BTreeMap<String, bool>,
    /// Print a table per scan while the suite runs.
    pub console: bool,
    pub report_console: ReportFields,
    /// Defaults to `<build_dir>/accessibility-reports`.
    pub reports_dir: Option<PathBuf>,
    /// Emit a SARIF file next to the merged JSON.
    pub sarif: bool,
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            tags: DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
            ignored_rules: DEFAULT_IGNORED_RULES
                .iter()
                .map(|(rule, ignored)| (rule.to_string(), *ignored))
                .collect(),
            console: true,
            report_console: ReportFields::console_default(),
            reports_dir: None,
            sarif: false,
        }
    }
}

impl AccessibilityConfig {
    pub fn console_fields(&self) -> Option<ReportFields> {
        self.console.then_some(self.report_console)
    }

    pub fn resolved_reports_dir(&self, build_dir: &Path) -> PathBuf {
        self.reports_dir
            .clone()
            .unwrap_or_else(|| build_dir.join("accessibility-reports"))
    }
}
