//! Writing report documents to the reports directory

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ReporterConfig;
use crate::error::{ReportError, ReportResult};
use crate::html;
use crate::result::TestResult;
use crate::run::FinishedRun;
use crate::summary::Summary;

/// File name for a report written at `ts`:
/// `test-report-<ISO 8601 UTC, ':' and '.' replaced by '-'>.<ext>`
pub fn report_file_name(ts: DateTime<Local>, ext: &str) -> String {
    let stamp = ts
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("test-report-{}.{}", stamp, ext)
}

/// Machine-readable copy of a finished run, written next to the HTML report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDocument {
    pub title: String,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub summary: Summary,
    pub pass_rate: f64,
    pub fail_rate: f64,
    pub results: Vec<TestResult>,
}

impl RunDocument {
    pub fn new(run: &FinishedRun, title: &str) -> Self {
        let summary = *run.summary();
        Self {
            title: title.to_string(),
            started_at: run.started_at(),
            finished_at: run.finished_at(),
            summary,
            pass_rate: summary.pass_rate(),
            fail_rate: summary.fail_rate(),
            results: run.results().to_vec(),
        }
    }

    pub fn from_json(json: &str) -> ReportResult<Self> {
        serde_json::from_str(json).map_err(ReportError::from)
    }

    pub fn from_file(path: &Path) -> ReportResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        Self::from_json(&content)
    }
}

/// Paths produced by one [`ReportWriter::write`]
#[derive(Debug, Clone)]
pub struct WrittenReport {
    pub html_path: PathBuf,
    pub json_path: Option<PathBuf>,
}

/// Persists rendered reports. Rendering happens before any file is opened.
pub struct ReportWriter {
    reports_dir: PathBuf,
    title: String,
    json_summary: bool,
}

impl ReportWriter {
    pub fn new(config: &ReporterConfig) -> Self {
        Self {
            reports_dir: config.reports_dir.clone(),
            title: config.title.clone(),
            json_summary: config.json_summary,
        }
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    /// Write the HTML report, plus the JSON summary when enabled.
    ///
    /// An existing file with the same name is overwritten.
    pub fn write(&self, run: &FinishedRun) -> ReportResult<WrittenReport> {
        let document = html::render(run, &self.title);
        let json = if self.json_summary {
            Some(serde_json::to_string_pretty(&RunDocument::new(run, &self.title))?)
        } else {
            None
        };

        std::fs::create_dir_all(&self.reports_dir)
            .map_err(|e| ReportError::io(&self.reports_dir, e))?;

        let html_path = self.reports_dir.join(report_file_name(run.finished_at(), "html"));
        write_file(&html_path, document.as_bytes())?;
        info!("HTML report written to: {}", html_path.display());

        let json_path = match json {
            Some(json) => {
                let path = self.reports_dir.join(report_file_name(run.finished_at(), "json"));
                write_file(&path, json.as_bytes())?;
                info!("JSON summary written to: {}", path.display());
                Some(path)
            }
            None => None,
        };

        Ok(WrittenReport { html_path, json_path })
    }
}

fn write_file(path: &Path, contents: &[u8]) -> ReportResult<()> {
    let file = File::create(path).map_err(|e| ReportError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents).map_err(|e| ReportError::io(path, e))?;
    // Flush explicitly; BufWriter's drop would swallow the error
    writer.flush().map_err(|e| ReportError::io(path, e))?;
    Ok(())
}
