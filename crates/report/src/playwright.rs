//! Conversion of Playwright JSON reporter output into test results
//!
//! The browser suites run under Playwright with `--reporter=json`. Each
//! spec/project pair becomes one [`TestResult`]; the final retry decides its
//! status. Skipped tests are not recorded.

use std::path::Path;
use std::sync::OnceLock;

use chrono::{DateTime, Duration, Local, Utc};
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{ReportError, ReportResult};
use crate::result::{TestResult, TestStatus};

const TITLE_SEPARATOR: &str = " › ";

/// Results of one or more Playwright reports, with the run window Playwright
/// measured when the report carries `stats`
#[derive(Debug, Clone, Default)]
pub struct PlaywrightRun {
    pub started_at: Option<DateTime<Local>>,
    pub finished_at: Option<DateTime<Local>>,
    pub results: Vec<TestResult>,
}

impl PlaywrightRun {
    /// Append another shard, widening the run window to cover both
    pub fn merge(&mut self, other: PlaywrightRun) {
        self.started_at = match (self.started_at, other.started_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.finished_at = match (self.finished_at, other.finished_at) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self.results.extend(other.results);
    }
}

#[derive(Debug, Deserialize)]
struct JsonReport {
    #[serde(default)]
    suites: Vec<JsonSuite>,
    #[serde(default)]
    errors: Vec<JsonError>,
    #[serde(default)]
    stats: Option<JsonStats>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonStats {
    start_time: DateTime<Utc>,
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct JsonSuite {
    #[serde(default)]
    title: String,
    #[serde(default)]
    specs: Vec<JsonSpec>,
    #[serde(default)]
    suites: Vec<JsonSuite>,
}

#[derive(Debug, Deserialize)]
struct JsonSpec {
    title: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    file: String,
    #[serde(default)]
    line: u32,
    #[serde(default)]
    tests: Vec<JsonTest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonTest {
    #[serde(default)]
    project_name: String,
    #[serde(default)]
    results: Vec<JsonAttempt>,
}

#[derive(Debug, Deserialize)]
struct JsonAttempt {
    status: String,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    error: Option<JsonError>,
    #[serde(default)]
    errors: Vec<JsonError>,
}

#[derive(Debug, Deserialize)]
struct JsonError {
    #[serde(default)]
    message: Option<String>,
}

fn ansi_escape() -> &'static Regex {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    ANSI.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("valid ANSI pattern"))
}

/// Remove terminal colour codes Playwright embeds in error messages
pub fn strip_ansi(text: &str) -> String {
    ansi_escape().replace_all(text, "").into_owned()
}

/// Parse one Playwright JSON report
pub fn parse_report(json: &str) -> ReportResult<PlaywrightRun> {
    let report: JsonReport = serde_json::from_str(json)?;

    let mut results = Vec::new();
    let mut path = Vec::new();
    for suite in &report.suites {
        collect_suite(suite, &mut path, &mut results)?;
    }

    if results.is_empty() {
        if let Some(message) = report.errors.iter().find_map(|e| e.message.as_deref()) {
            return Err(ReportError::Playwright(strip_ansi(message)));
        }
    }

    let (started_at, finished_at) = match report.stats {
        Some(stats) => {
            let start = stats.start_time.with_timezone(&Local);
            let end = start + Duration::milliseconds(stats.duration.max(0.0).round() as i64);
            (Some(start), Some(end))
        }
        None => (None, None),
    };

    Ok(PlaywrightRun {
        started_at,
        finished_at,
        results,
    })
}

pub fn from_file(path: &Path) -> ReportResult<PlaywrightRun> {
    let content = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    parse_report(&content)
}

/// Load every `*.json` report under `dir` (e.g. one per shard), in path order
pub fn load_all(dir: &Path) -> ReportResult<PlaywrightRun> {
    let mut run = PlaywrightRun::default();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            ReportError::io(path, e.into())
        })?;
        let is_json = entry.path().extension().map(|ext| ext == "json").unwrap_or(false);
        if entry.file_type().is_file() && is_json {
            debug!("Loading Playwright report {}", entry.path().display());
            run.merge(from_file(entry.path())?);
        }
    }

    Ok(run)
}

fn collect_suite<'a>(
    suite: &'a JsonSuite,
    path: &mut Vec<&'a str>,
    out: &mut Vec<TestResult>,
) -> ReportResult<()> {
    if !suite.title.is_empty() {
        path.push(&suite.title);
    }

    for spec in &suite.specs {
        let multi_project = spec.tests.len() > 1;
        for test in &spec.tests {
            if let Some(result) = convert(spec, test, path, multi_project)? {
                out.push(result);
            }
        }
    }

    for child in &suite.suites {
        collect_suite(child, path, out)?;
    }

    if !suite.title.is_empty() {
        path.pop();
    }
    Ok(())
}

fn convert(
    spec: &JsonSpec,
    test: &JsonTest,
    path: &[&str],
    multi_project: bool,
) -> ReportResult<Option<TestResult>> {
    let Some(attempt) = test.results.last() else {
        debug!("No attempts recorded for '{}'", spec.title);
        return Ok(None);
    };

    let mut id = if spec.id.is_empty() {
        format!("{}:{}", spec.file, spec.line)
    } else {
        spec.id.clone()
    };
    if multi_project && !test.project_name.is_empty() {
        id = format!("{} [{}]", id, test.project_name);
    }

    let mut title: Vec<&str> = path.to_vec();
    title.push(&spec.title);
    let title = title.join(TITLE_SEPARATOR);

    let duration_ms = attempt.duration.max(0.0).round() as u64;

    let status = match attempt.status.as_str() {
        "passed" => TestStatus::Pass,
        "skipped" => {
            warn!("Skipping '{}': test was not run", title);
            return Ok(None);
        }
        _ => TestStatus::Fail,
    };

    let error = match status {
        TestStatus::Pass => None,
        TestStatus::Fail => Some(
            attempt
                .error
                .iter()
                .chain(attempt.errors.iter())
                .find_map(|e| e.message.as_deref())
                .map(strip_ansi)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| attempt.status.clone()),
        ),
    };

    TestResult::new(id, title, status, duration_ms, error).map(Some)
}
