use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryToggle {
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

/// When to print the per-category results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DebugMode {
    Always,
    Never,
    #[default]
    IfFail,
}

impl DebugMode {
    pub fn should_log(&self, failed: bool) -> bool {
        match self {
            DebugMode::Always => true,
            DebugMode::Never => false,
            DebugMode::IfFail => failed,
        }
    }
}

impl FromStr for DebugMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(DebugMode::Always),
            "never" => Ok(DebugMode::Never),
            "if-fail" | "iffail" => Ok(DebugMode::IfFail),
            _ => Err(format!("Invalid debug mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFactor {
    #[default]
    Desktop,
    Mobile,
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormFactor::Desktop => write!(f, "desktop"),
            FormFactor::Mobile => write!(f, "mobile"),
        }
    }
}

impl FromStr for FormFactor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "desktop" => Ok(FormFactor::Desktop),
            "mobile" => Ok(FormFactor::Mobile),
            _ => Err(format!("Invalid form factor: {}", s)),
        }
    }
}

/// Lighthouse category thresholds, on the 0..1 score scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceConfig {
    pub categories: Vec<CategoryToggle>,
    pub thresholds: BTreeMap<String, f64>,
    pub debug: DebugMode,
    pub form_factor: FormFactor,
    /// Defaults to `<build_dir>/performance-reports`.
    pub reports_dir: Option<PathBuf>,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        let categories = [
            ("performance", true),
            ("accessibility", true),
            ("best-practices", true),
            ("seo", true),
            ("pwa", false),
        ];
        let thresholds = [
            ("performance", 0.4),
            ("accessibility", 0.95),
            ("best-practices", 0.8),
            ("seo", 0.8),
            ("pwa", 0.5),
        ];

        Self {
            categories: categories
                .iter()
                .map(|(name, enabled)| CategoryToggle {
                    name: name.to_string(),
                    enabled: *enabled,
                })
                .collect(),
            thresholds: thresholds
                .iter()
                .map(|(name, t)| (name.to_string(), *t))
                .collect(),
            debug: DebugMode::default(),
            form_factor: FormFactor::default(),
            reports_dir: None,
        }
    }
}

impl PerformanceConfig {
    pub fn enabled_categories(&self) -> Vec<String> {
        self.categories
            .iter()
            .filter(|c| c.enabled)
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn resolved_reports_dir(&self, build_dir: &Path) -> PathBuf {
        self.reports_dir
            .clone()
            .unwrap_or_else(|| build_dir.join("performance-reports"))
    }

    /// Thresholds outside 0..=1 are almost always a percent typed by mistake.
    pub fn validate(&self) -> Result<(), String> {
        for (category, threshold) in &self.thresholds {
            if !(0.0..=1.0).contains(threshold) {
                return Err(format!(
                    "threshold for '{}' must be between 0 and 1, got {}",
                    category, threshold
                ));
            }
        }
        Ok(())
    }
}
