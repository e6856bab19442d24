//! Lighthouse result evaluation.
//!
//! Scores come from a Lighthouse JSON report (either the full runner result
//! with an `lhr` key or the bare `lhr`). Each selected category is compared
//! against its threshold on the 0..1 scale and reported as whole percents.

use crate::config::{DebugMode, FormFactor, PerformanceConfig};
use crate::utils::timestamp::compact_timestamp;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryResult {
    pub actual: u32,
    pub threshold: u32,
    pub passed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceAnalysis {
    pub results: BTreeMap<String, CategoryResult>,
    pub failures: Vec<String>,
}

impl PerformanceAnalysis {
    pub fn has_failed(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Per-audit adjustments layered over `PerformanceConfig`.
#[derive(Debug, Clone, Default)]
pub struct PerformanceOverride {
    /// Replaces the enabled category list when set.
    pub categories: Option<Vec<String>>,
    /// Merged over the configured thresholds.
    pub thresholds: BTreeMap<String, f64>,
    pub debug: Option<DebugMode>,
    pub form_factor: Option<FormFactor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditSettings {
    pub categories: Vec<String>,
    pub thresholds: BTreeMap<String, f64>,
    pub debug: DebugMode,
    pub form_factor: FormFactor,
}

pub fn resolve_audit_settings(config: &PerformanceConfig, ov: &PerformanceOverride) -> AuditSettings {
    let mut thresholds = config.thresholds.clone();
    thresholds.extend(ov.thresholds.iter().map(|(k, v)| (k.clone(), *v)));

    AuditSettings {
        categories: ov
            .categories
            .clone()
            .unwrap_or_else(|| config.enabled_categories()),
        thresholds,
        debug: ov.debug.unwrap_or(config.debug),
        form_factor: ov.form_factor.unwrap_or(config.form_factor),
    }
}

fn to_percent(score: f64) -> u32 {
    (score * 100.0).round().max(0.0) as u32
}

/// Missing categories or null scores count as 0.
pub fn category_score(report: &Value, category: &str) -> f64 {
    let lhr = report.get("lhr").unwrap_or(report);
    lhr.get("categories")
        .and_then(|c| c.get(category))
        .and_then(|c| c.get("score"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

pub fn analyze_results(
    report: &Value,
    categories: &[String],
    thresholds: &BTreeMap<String, f64>,
) -> PerformanceAnalysis {
    let mut analysis = PerformanceAnalysis::default();

    for (category, threshold) in thresholds {
        if !categories.contains(category) {
            continue;
        }

        let score = category_score(report, category);
        let result = CategoryResult {
            actual: to_percent(score),
            threshold: to_percent(*threshold),
            passed: score >= *threshold,
        };

        if !result.passed {
            analysis.failures.push(format!(
                "{}: {}% < {}%",
                category, result.actual, result.threshold
            ));
        }
        analysis.results.insert(category.clone(), result);
    }

    analysis
}

/// "https://example.com/a/b?q=1" -> "example.com_a_b_q=1"
pub fn filename_from_url(url: &str) -> String {
    let without_protocol = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    let mut name = String::with_capacity(without_protocol.len());
    for c in without_protocol.chars() {
        let c = match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        };
        if c == '_' && name.ends_with('_') {
            continue;
        }
        name.push(c);
    }

    name.trim_matches('_').to_string()
}

/// `<url-name>_[<form factor>]_<YYYY-MM-DD_HH-MM-SS>`
pub fn report_base_filename(url: &str, form_factor: FormFactor, now: DateTime<Utc>) -> String {
    format!(
        "{}_[{}]_{}",
        filename_from_url(url),
        form_factor,
        compact_timestamp(now)
    )
}
