use crate::config::Config;
use crate::error::{ReportError, Result};
use std::fs;
use tracing::{debug, info};

pub fn handle_clean_command(config: &Config) {
    if let Err(e) = clean_build_dir(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Returns whether anything was removed.
pub fn clean_build_dir(config: &Config) -> Result<bool> {
    let build_dir = &config.build_dir;
    if !build_dir.exists() {
        debug!("Nothing to clean at {}", build_dir.display());
        return Ok(false);
    }

    info!("Removing {} directory before tests...", build_dir.display());
    fs::remove_dir_all(build_dir).map_err(|e| ReportError::io(build_dir, e))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_existing_build_dir() {
        let dir = tempfile::tempdir().unwrap();
        let build_dir = dir.path().join("build");
        fs::create_dir_all(build_dir.join("accessibility-reports")).unwrap();
        fs::write(build_dir.join("accessibility-reports/a.json"), "{}").unwrap();

        let config = Config {
            build_dir: build_dir.clone(),
            ..Config::default()
        };

        assert!(clean_build_dir(&config).unwrap());
        assert!(!build_dir.exists());
        assert!(!clean_build_dir(&config).unwrap());
    }
}
