use crate::models::impact::Impact;
use crate::models::violation::{
    null_as_default, FilteredViolation, ReportedViolation, StructuredViolation,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What a single scan writes to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerTestReport {
    pub violations: Vec<FilteredViolation>,
    pub timestamp: String,
}

/// Lenient read-side view of a per-test report file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PerTestReportInput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub violations: Vec<ReportedViolation>,
}

/// The merged report written once per suite.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConsolidatedReport {
    pub violations: Vec<StructuredViolation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub critical: usize,
    pub serious: usize,
    pub moderate: usize,
    pub minor: usize,
    pub other: usize,
    pub total: usize,
    pub pages: usize,
}

impl ConsolidatedReport {
    pub fn new(violations: Vec<StructuredViolation>) -> Self {
        Self {
            violations,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: String) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

pub fn summarize(violations: &[StructuredViolation]) -> Summary {
    let mut summary = Summary {
        total: violations.len(),
        ..Summary::default()
    };

    for violation in violations {
        match violation.impact {
            Impact::Critical => summary.critical += 1,
            Impact::Serious => summary.serious += 1,
            Impact::Moderate => summary.moderate += 1,
            Impact::Minor => summary.minor += 1,
            Impact::Unset | Impact::Other(_) => summary.other += 1,
        }
    }

    summary.pages = violations
        .iter()
        .flat_map(|v| v.pages.iter().map(|p| p.url.as_str()))
        .collect::<HashSet<_>>()
        .len();

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_or_missing_violations_read_as_empty() {
        let null: PerTestReportInput = serde_json::from_str(r#"{"violations": null}"#).unwrap();
        assert!(null.violations.is_empty());

        let missing: PerTestReportInput =
            serde_json::from_str(r#"{"timestamp": "2024-01-01T00:00:00.000Z"}"#).unwrap();
        assert!(missing.violations.is_empty());
    }
}
