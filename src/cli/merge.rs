use crate::config::Config;
use crate::core::merge::{merge_reports, MergeOptions, MergeOutcome, DEFAULT_OUTPUT_FILE};
use crate::models::report::summarize;
use std::path::PathBuf;

pub fn handle_merge_command(
    config: &Config,
    output: Option<PathBuf>,
    no_timestamp: bool,
    sarif: bool,
) {
    let reports_dir = config.accessibility_reports_dir();
    let output = output.unwrap_or_else(|| reports_dir.join(DEFAULT_OUTPUT_FILE));
    let options = MergeOptions {
        include_timestamp: !no_timestamp,
        sarif: sarif || config.accessibility.sarif,
    };

    match merge_reports(&reports_dir, &output, &options) {
        Ok(outcome) => print_outcome(&outcome),
        Err(e) => {
            eprintln!("Error during merge: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_outcome(outcome: &MergeOutcome) {
    let Some(output_file) = &outcome.output_file else {
        println!("No accessibility reports to merge");
        return;
    };

    let summary = summarize(&outcome.violations);
    println!(
        "Merged {} report(s) into {}: {} rule(s) violated ({} critical, {} serious, {} moderate, {} minor) across {} page(s)",
        outcome.merged_count(),
        output_file.display(),
        summary.total,
        summary.critical,
        summary.serious,
        summary.moderate,
        summary.minor,
        summary.pages,
    );
    if let Some(markdown) = &outcome.markdown_file {
        println!("Markdown report: {}", markdown.display());
    }
    println!("Removed {} merged source file(s)", outcome.removed);
    if !outcome.skipped.is_empty() {
        println!("Skipped {} unreadable file(s)", outcome.skipped.len());
    }
}
