use crate::core::dedup::deduplicate_violations;
use crate::error::{ReportError, Result};
use crate::models::{
    ConsolidatedReport, PageEntry, PerTestReportInput, ReportedViolation, StructuredViolation,
};
use crate::output::markdown::write_markdown;
use crate::output::sarif::write_sarif;
use crate::utils::fs::{read_json, write_json_pretty};
use crate::utils::timestamp::iso_timestamp;
use chrono::Utc;
use fnv::FnvHashMap;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const UNKNOWN_URL: &str = "unknown";

/// Consolidated report name. Never treated as a per-test input, even when a
/// merge writes somewhere else.
pub const DEFAULT_OUTPUT_FILE: &str = "accessibility-report.json";

#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    pub include_timestamp: bool,
    /// Also write `accessibility-report.sarif` next to the JSON output.
    pub sarif: bool,
}

/// A per-test file that could not be read or parsed. It is left on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug)]
enum FileOutcome {
    Parsed {
        path: PathBuf,
        violations: Vec<ReportedViolation>,
    },
    Skipped(SkippedFile),
}

#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub violations: Vec<StructuredViolation>,
    pub merged_files: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
    pub removed: usize,
    pub output_file: Option<PathBuf>,
    pub markdown_file: Option<PathBuf>,
}

impl MergeOutcome {
    pub fn merged_count(&self) -> usize {
        self.merged_files.len()
    }
}

/// Merge every per-test report in `reports_dir` into `output_file` and an
/// `accessibility-report.md` beside it, then remove the merged sources.
///
/// A missing directory is a no-op. Unreadable files are skipped and kept;
/// write failures propagate before any source file is touched.
pub fn merge_reports(
    reports_dir: &Path,
    output_file: &Path,
    options: &MergeOptions,
) -> Result<MergeOutcome> {
    if !reports_dir.exists() {
        return Ok(MergeOutcome::default());
    }

    let candidates = collect_candidates(reports_dir, output_file)?;

    // Parsing runs in parallel; collect() keeps candidate order.
    let outcomes: Vec<FileOutcome> = candidates.par_iter().map(|p| load_report(p)).collect();

    let mut all_violations = Vec::new();
    let mut merged_files = Vec::new();
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            FileOutcome::Parsed { path, violations } => {
                all_violations.extend(violations);
                merged_files.push(path);
            }
            FileOutcome::Skipped(file) => {
                warn!("Error reading file {}: {}", file.path.display(), file.reason);
                skipped.push(file);
            }
        }
    }

    let unique = deduplicate_violations(all_violations);
    let structured = transform_violations(unique);

    let mut report = ConsolidatedReport::new(structured);
    if options.include_timestamp {
        report = report.with_timestamp(iso_timestamp(Utc::now()));
    }

    write_json_pretty(output_file, &report)?;
    let output_dir = output_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let markdown_file = write_markdown(&report.violations, output_dir)?;
    if options.sarif {
        write_sarif(&report.violations, &output_file.with_extension("sarif"))?;
    }

    let removed = remove_sources(&merged_files);
    info!(
        "Merged {} report file(s) into {} ({} violation rule(s), {} skipped)",
        merged_files.len(),
        output_file.display(),
        report.violations.len(),
        skipped.len()
    );

    Ok(MergeOutcome {
        violations: report.violations,
        merged_files,
        skipped,
        removed,
        output_file: Some(output_file.to_path_buf()),
        markdown_file: Some(markdown_file),
    })
}

/// `.json` files in `dir`, minus consolidated outputs, sorted by name so
/// timestamped files are merged oldest first.
fn collect_candidates(dir: &Path, output_file: &Path) -> Result<Vec<PathBuf>> {
    let output_name = output_file.file_name();
    let entries = fs::read_dir(dir).map_err(|e| ReportError::io(dir, e))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ReportError::io(dir, e))?;
        let path = entry.path();
        let name = entry.file_name();

        if Some(name.as_os_str()) == output_name || name == DEFAULT_OUTPUT_FILE {
            continue;
        }
        if !name.to_string_lossy().ends_with(".json") || !path.is_file() {
            continue;
        }
        candidates.push(path);
    }

    candidates.sort();
    Ok(candidates)
}

fn load_report(path: &Path) -> FileOutcome {
    match read_json::<PerTestReportInput>(path) {
        Ok(input) => FileOutcome::Parsed {
            path: path.to_path_buf(),
            violations: input.violations,
        },
        Err(e) => FileOutcome::Skipped(SkippedFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

fn remove_sources(files: &[PathBuf]) -> usize {
    let mut removed = 0;
    for file in files {
        match fs::remove_file(file) {
            Ok(()) => {
                info!("Cleaned up temporary file: {}", file.display());
                removed += 1;
            }
            Err(e) => warn!("Error removing temporary file {}: {}", file.display(), e),
        }
    }
    removed
}

/// Regroup deduplicated entries by rule id. Within a rule, entries for the
/// same URL accumulate their selectors in input order. The result is sorted
/// by impact, unknown impact last; ties keep first-seen order.
pub fn transform_violations(violations: Vec<ReportedViolation>) -> Vec<StructuredViolation> {
    let mut grouped: Vec<StructuredViolation> = Vec::new();
    let mut index_by_id: FnvHashMap<String, usize> = FnvHashMap::default();

    for v in violations {
        let url = v.url.clone().unwrap_or_else(|| UNKNOWN_URL.to_string());
        let nodes: Vec<String> = v.nodes.iter().flat_map(|n| n.selectors()).collect();

        let idx = *index_by_id.entry(v.id.clone()).or_insert_with(|| {
            grouped.push(StructuredViolation {
                id: v.id,
                impact: v.impact,
                description: v.description,
                help: v.help,
                help_url: v.help_url,
                tags: v.tags,
                pages: Vec::new(),
            });
            grouped.len() - 1
        });

        let entry = &mut grouped[idx];
        match entry.pages.iter_mut().find(|p| p.url == url) {
            Some(page) => page.nodes.extend(nodes),
            None => entry.pages.push(PageEntry { url, nodes }),
        }
    }

    grouped.sort_by_key(|v| v.impact.rank());
    grouped
}
