use crate::config::Config;
use crate::core::reporter::PerTestReporter;
use crate::error::Result;
use crate::models::ScanResults;
use crate::utils::fs::read_json;
use std::path::{Path, PathBuf};

pub fn handle_record_command(
    config: &Config,
    input: PathBuf,
    url: Option<String>,
    fail_on_violations: bool,
) {
    match record_scan(config, &input, url) {
        Ok((path, count)) => {
            println!("Recorded {} violation(s) to {}", count, path.display());
            if fail_on_violations && count > 0 {
                eprintln!("Error: {} accessibility violation(s) found", count);
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error recording scan: {}", e);
            std::process::exit(1);
        }
    }
}

/// `url` wins over the one embedded in the scan results.
pub fn record_scan(config: &Config, input: &Path, url: Option<String>) -> Result<(PathBuf, usize)> {
    let results: ScanResults = read_json(input)?;
    let url = url.or(results.url);

    let reporter = PerTestReporter::new(config.accessibility_reports_dir())
        .with_console(config.accessibility.console_fields());
    let path = reporter.record(&results.violations, url.as_deref())?;

    Ok((path, results.violations.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PerTestReportInput;
    use std::fs;

    #[test]
    fn test_record_scan_writes_per_test_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scan.json");
        fs::write(
            &input,
            r##"{"url": "https://a.test/", "violations": [
                {"id": "region", "impact": "moderate", "help": "h",
                 "nodes": [{"target": ["#main"]}]}
            ]}"##,
        )
        .unwrap();

        let mut config = Config {
            build_dir: dir.path().join("build"),
            ..Config::default()
        };
        config.accessibility.console = false;

        let (path, count) =
            record_scan(&config, &input, Some("https://b.test/".to_string())).unwrap();

        assert_eq!(count, 1);
        assert!(path.starts_with(dir.path().join("build/accessibility-reports")));
        let written: PerTestReportInput = read_json(&path).unwrap();
        assert_eq!(written.violations[0].id, "region");
        assert_eq!(written.violations[0].url.as_deref(), Some("https://b.test/"));
    }

    #[test]
    fn test_record_scan_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        assert!(record_scan(&config, &dir.path().join("missing.json"), None).is_err());
    }
}
