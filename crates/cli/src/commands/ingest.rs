//! Ingest Playwright results into a reported run

use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::Args;
use tracing::debug;

use storefront_report::playwright::{self, PlaywrightRun};
use storefront_report::{Reporter, ReporterConfig};

#[derive(Args)]
pub struct IngestArgs {
    /// Playwright JSON report files, or directories of shard reports
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Reporter configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory the reports are written to
    #[arg(short, long)]
    pub reports_dir: Option<PathBuf>,

    /// Heading of the HTML report
    #[arg(long)]
    pub title: Option<String>,

    /// Also write a JSON summary next to the HTML report
    #[arg(long)]
    pub json: bool,

    /// Do not print the console summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl IngestArgs {
    fn reporter_config(&self) -> anyhow::Result<ReporterConfig> {
        let mut config = match &self.config {
            Some(path) => ReporterConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ReporterConfig::default(),
        };

        if let Some(dir) = &self.reports_dir {
            config.reports_dir = dir.clone();
        }
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if self.json {
            config.json_summary = true;
        }
        if self.quiet {
            config.console = false;
        }
        Ok(config)
    }
}

/// Returns whether every recorded test passed
pub fn execute(args: IngestArgs) -> anyhow::Result<bool> {
    let config = args.reporter_config()?;

    let mut run = PlaywrightRun::default();
    for path in &args.paths {
        let loaded = if path.is_dir() {
            playwright::load_all(path)
        } else {
            playwright::from_file(path)
        }
        .with_context(|| format!("reading Playwright results from {}", path.display()))?;
        debug!("{}: {} result(s)", path.display(), loaded.results.len());
        run.merge(loaded);
    }

    let mut reporter = Reporter::new(config);
    reporter.begin_run_at(run.started_at.unwrap_or_else(Local::now))?;
    for result in run.results {
        reporter.record_result(result)?;
    }
    let report = reporter.end_run_at(run.finished_at.unwrap_or_else(Local::now))?;

    if let Some(json_path) = report.json_path.as_ref().filter(|_| !args.quiet) {
        println!("JSON summary generated: {}", json_path.display());
    }

    Ok(report.summary.all_passed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: IngestArgs,
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = TestCli::parse_from([
            "ingest",
            "results.json",
            "--reports-dir",
            "out",
            "--title",
            "Login Suite",
            "--json",
            "--quiet",
        ]);
        let config = cli.args.reporter_config().unwrap();
        assert_eq!(config.reports_dir, PathBuf::from("out"));
        assert_eq!(config.title, "Login Suite");
        assert!(config.json_summary);
        assert!(!config.console);
    }

    #[test]
    fn test_defaults_without_flags() {
        let cli = TestCli::parse_from(["ingest", "shards/"]);
        assert_eq!(cli.args.reporter_config().unwrap(), ReporterConfig::default());
    }

    fn write_report(dir: &tempfile::TempDir, status: &str, error: &str) -> PathBuf {
        let json = format!(
            r#"{{ "suites": [ {{ "title": "login.spec.js", "specs": [
    {{ "title": "valid login", "id": "v1", "tests": [ {{ "results": [ {{ "status": "passed", "duration": 40 }} ] }} ] }},
    {{ "title": "invalid password", "id": "i1", "tests": [ {{ "results": [
        {{ "status": "{}", "duration": 25, "error": {{ "message": "{}" }} }} ] }} ] }} ] }} ],
  "stats": {{ "startTime": "2026-10-18T09:30:00.000Z", "duration": 1200 }} }}"#,
            status, error
        );
        let path = dir.path().join("results.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    fn ingest(results: PathBuf, reports_dir: PathBuf) -> IngestArgs {
        IngestArgs {
            paths: vec![results],
            config: None,
            reports_dir: Some(reports_dir),
            title: None,
            json: true,
            quiet: true,
        }
    }

    #[test]
    fn test_any_failure_reports_not_passed() {
        let dir = tempfile::TempDir::new().unwrap();
        let results = write_report(&dir, "failed", "mismatch");
        let reports_dir = dir.path().join("test-results");

        assert!(!execute(ingest(results, reports_dir.clone())).unwrap());

        let written: Vec<_> = std::fs::read_dir(&reports_dir).unwrap().collect();
        assert_eq!(written.len(), 2);
    }

    #[test]
    fn test_all_passing_reports_passed() {
        let dir = tempfile::TempDir::new().unwrap();
        let results = write_report(&dir, "passed", "");
        assert!(execute(ingest(results, dir.path().join("test-results"))).unwrap());
    }

    #[test]
    fn test_unreadable_input_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(execute(ingest(missing, dir.path().join("test-results"))).is_err());
    }
}
