//! Error types for run reporting

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Run has not been started; call begin_run first")]
    RunNotStarted,

    #[error("Run already started at {0}")]
    RunAlreadyStarted(String),

    #[error("Run is closed; no further operations are accepted")]
    RunClosed,

    #[error("Duplicate test result id: {0}")]
    DuplicateResult(String),

    #[error("Invalid test result: {0}")]
    InvalidResult(String),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Console write failed: {0}")]
    Console(#[source] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Playwright report error: {0}")]
    Playwright(String),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
