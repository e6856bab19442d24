use crate::config::{Config, DebugMode, FormFactor};
use crate::core::performance::{
    analyze_results, report_base_filename, resolve_audit_settings, PerformanceAnalysis,
    PerformanceOverride,
};
use crate::error::{ReportError, Result};
use crate::output::console::render_performance_table;
use crate::utils::fs::{ensure_dir, read_json, write_json_pretty};
use chrono::Utc;
use clap::Args;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct PerfArgs {
    /// Lighthouse JSON result (runner result or bare lhr)
    #[arg(short, long, value_name = "LIGHTHOUSE_JSON")]
    pub input: PathBuf,

    /// Audited page, defaults to the URL recorded in the result
    #[arg(short, long)]
    pub url: Option<String>,

    /// Restrict the audit to these categories (repeatable)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// Threshold override as CATEGORY=SCORE, score between 0 and 1 (repeatable)
    #[arg(short, long = "threshold", value_name = "CATEGORY=SCORE")]
    pub thresholds: Vec<String>,

    /// always, never or if-fail
    #[arg(short, long)]
    pub debug: Option<String>,

    /// desktop or mobile
    #[arg(short, long)]
    pub form_factor: Option<String>,

    /// HTML report to store next to the JSON copy
    #[arg(long, value_name = "LIGHTHOUSE_HTML")]
    pub html: Option<PathBuf>,
}

impl PerfArgs {
    pub fn to_override(&self) -> Result<PerformanceOverride> {
        let mut thresholds = BTreeMap::new();
        for raw in &self.thresholds {
            let (category, score) = parse_threshold(raw)?;
            thresholds.insert(category, score);
        }

        Ok(PerformanceOverride {
            categories: (!self.categories.is_empty()).then(|| self.categories.clone()),
            thresholds,
            debug: self
                .debug
                .as_deref()
                .map(str::parse::<DebugMode>)
                .transpose()
                .map_err(ReportError::InvalidInput)?,
            form_factor: self
                .form_factor
                .as_deref()
                .map(str::parse::<FormFactor>)
                .transpose()
                .map_err(ReportError::InvalidInput)?,
        })
    }
}

fn parse_threshold(raw: &str) -> Result<(String, f64)> {
    let invalid = || ReportError::InvalidInput(format!("Invalid threshold '{}', expected CATEGORY=SCORE", raw));

    let (category, score) = raw.split_once('=').ok_or_else(invalid)?;
    let score: f64 = score.trim().parse().map_err(|_| invalid())?;
    if category.trim().is_empty() || !(0.0..=1.0).contains(&score) {
        return Err(invalid());
    }
    Ok((category.trim().to_string(), score))
}

/// The URL Lighthouse actually audited, after redirects.
fn audited_url(report: &Value) -> Option<String> {
    let lhr = report.get("lhr").unwrap_or(report);
    ["finalDisplayedUrl", "finalUrl", "requestedUrl"]
        .iter()
        .find_map(|key| lhr.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

pub struct PerfOutcome {
    pub url: String,
    pub analysis: PerformanceAnalysis,
    pub debug: DebugMode,
    pub saved: Vec<PathBuf>,
}

pub fn run_performance_audit(config: &Config, args: &PerfArgs) -> Result<PerfOutcome> {
    let settings = resolve_audit_settings(&config.performance, &args.to_override()?);
    let report: Value = read_json(&args.input)?;

    let url = args
        .url
        .clone()
        .or_else(|| audited_url(&report))
        .ok_or_else(|| {
            ReportError::InvalidInput(format!(
                "No URL in {}, pass --url",
                args.input.display()
            ))
        })?;

    let folder = config.performance_reports_dir();
    ensure_dir(&folder)?;
    let base = report_base_filename(&url, settings.form_factor, Utc::now());

    let mut saved = Vec::new();
    let json_path = folder.join(format!("{}.json", base));
    write_json_pretty(&json_path, &report)?;
    saved.push(json_path);

    if let Some(html) = &args.html {
        let html_path = folder.join(format!("{}.html", base));
        fs::copy(html, &html_path).map_err(|e| ReportError::io(html, e))?;
        saved.push(html_path);
    }

    let analysis = analyze_results(&report, &settings.categories, &settings.thresholds);
    Ok(PerfOutcome {
        url,
        analysis,
        debug: settings.debug,
        saved,
    })
}

pub fn handle_perf_command(config: &Config, args: PerfArgs) {
    match run_performance_audit(config, &args) {
        Ok(outcome) => {
            for path in &outcome.saved {
                println!("Saved Lighthouse report to {}", path.display());
            }
            let failed = outcome.analysis.has_failed();
            if outcome.debug.should_log(failed) {
                println!("{}", render_performance_table(&outcome.url, &outcome.analysis));
            }
            if failed {
                eprintln!(
                    "Error: Lighthouse thresholds not met for {}:\n  {}",
                    outcome.url,
                    outcome.analysis.failures.join("\n  ")
                );
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error during performance audit: {}", e);
            std::process::exit(1);
        }
    }
}
