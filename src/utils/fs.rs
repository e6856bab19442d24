use crate::error::{ReportError, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))
}

/// Writes `value` as pretty JSON, creating parent directories first.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let content = serde_json::to_string_pretty(value).map_err(|e| ReportError::json(path, e))?;
    fs::write(path, content).map_err(|e| ReportError::io(path, e))
}

pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, content).map_err(|e| ReportError::io(path, e))
}

pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| ReportError::json(path, e))
}
