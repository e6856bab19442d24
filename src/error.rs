use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Invalid JSON in '{path}': {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },

    #[error("Error parsing config file '{path}': {message}")]
    Config { path: PathBuf, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ReportError::Io {
            source,
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn json(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        ReportError::Json {
            source,
            path: path.as_ref().to_path_buf(),
        }
    }
}
