//! Run lifecycle: begin, record, end

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config::ReporterConfig;
use crate::console;
use crate::error::{ReportError, ReportResult};
use crate::persist::ReportWriter;
use crate::result::TestResult;
use crate::summary::Summary;

/// Immutable snapshot of a closed run; the only input the renderers take
#[derive(Debug, Clone)]
pub struct FinishedRun {
    started_at: DateTime<Local>,
    finished_at: DateTime<Local>,
    results: Vec<TestResult>,
    summary: Summary,
}

impl FinishedRun {
    /// Close over a set of results. An end time before the start counts as
    /// zero elapsed time.
    pub fn new(
        started_at: DateTime<Local>,
        finished_at: DateTime<Local>,
        results: Vec<TestResult>,
    ) -> Self {
        let duration_ms = (finished_at - started_at).num_milliseconds().max(0) as u64;
        let summary = Summary::from_results(&results, duration_ms);
        Self {
            started_at,
            finished_at,
            results,
            summary,
        }
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn finished_at(&self) -> DateTime<Local> {
        self.finished_at
    }

    /// Results in the order they were recorded
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

/// What `end_run` produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: Summary,
    pub report_path: PathBuf,
    pub json_path: Option<PathBuf>,
}

#[derive(Debug)]
struct ActiveRun {
    started_at: DateTime<Local>,
    results: Vec<TestResult>,
    ids: HashSet<String>,
}

#[derive(Debug)]
enum RunState {
    Idle,
    Running(ActiveRun),
    Finished,
}

/// Collects results for exactly one run.
///
/// Console output goes to `W` (stdout unless built with
/// [`Reporter::with_output`]); the HTML document goes to the configured
/// reports directory.
pub struct Reporter<W: Write = io::Stdout> {
    config: ReporterConfig,
    out: W,
    state: RunState,
}

impl Reporter<io::Stdout> {
    pub fn new(config: ReporterConfig) -> Self {
        Self::with_output(config, io::stdout())
    }
}

impl Default for Reporter<io::Stdout> {
    fn default() -> Self {
        Self::new(ReporterConfig::default())
    }
}

impl<W: Write> Reporter<W> {
    pub fn with_output(config: ReporterConfig, out: W) -> Self {
        Self {
            config,
            out,
            state: RunState::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RunState::Running(_))
    }

    /// Results recorded so far; empty unless a run is in progress
    pub fn results(&self) -> &[TestResult] {
        match &self.state {
            RunState::Running(run) => &run.results,
            _ => &[],
        }
    }

    /// Give back the console sink, e.g. to inspect captured output
    pub fn into_output(self) -> W {
        self.out
    }

    pub fn begin_run(&mut self) -> ReportResult<()> {
        self.begin_run_at(Local::now())
    }

    pub fn begin_run_at(&mut self, started_at: DateTime<Local>) -> ReportResult<()> {
        match &self.state {
            RunState::Idle => {}
            RunState::Running(run) => {
                let started = console::display_timestamp(run.started_at);
                return Err(ReportError::RunAlreadyStarted(started));
            }
            RunState::Finished => return Err(ReportError::RunClosed),
        }

        if self.config.console {
            write!(self.out, "{}", console::start_banner(started_at))
                .map_err(ReportError::Console)?;
        }

        info!("Test run started at {}", started_at.to_rfc3339());
        self.state = RunState::Running(ActiveRun {
            started_at,
            results: Vec::new(),
            ids: HashSet::new(),
        });
        Ok(())
    }

    pub fn record_result(&mut self, result: TestResult) -> ReportResult<()> {
        let run = match &mut self.state {
            RunState::Running(run) => run,
            RunState::Idle => return Err(ReportError::RunNotStarted),
            RunState::Finished => return Err(ReportError::RunClosed),
        };

        if !run.ids.insert(result.id().to_string()) {
            return Err(ReportError::DuplicateResult(result.id().to_string()));
        }

        debug!(
            "Recorded {} {} ({} ms)",
            result.id(),
            result.status(),
            result.execution_time_ms()
        );
        run.results.push(result);
        Ok(())
    }

    pub fn end_run(&mut self) -> ReportResult<RunReport> {
        self.end_run_at(Local::now())
    }

    /// Close the run, print the console summary and persist the report.
    ///
    /// The run is closed even when writing fails; the error is returned and
    /// later calls see [`ReportError::RunClosed`].
    pub fn end_run_at(&mut self, finished_at: DateTime<Local>) -> ReportResult<RunReport> {
        let run = match std::mem::replace(&mut self.state, RunState::Finished) {
            RunState::Running(run) => run,
            RunState::Idle => {
                self.state = RunState::Idle;
                return Err(ReportError::RunNotStarted);
            }
            RunState::Finished => return Err(ReportError::RunClosed),
        };

        let finished = FinishedRun::new(run.started_at, finished_at, run.results);
        self.finish(&finished)
    }

    /// The report file is written even when the console sink fails; a
    /// storage error takes precedence over a console error.
    fn finish(&mut self, run: &FinishedRun) -> ReportResult<RunReport> {
        let printed = if self.config.console {
            self.out
                .write_all(console::render(run).as_bytes())
                .and_then(|_| self.out.flush())
        } else {
            Ok(())
        };

        let written = ReportWriter::new(&self.config).write(run)?;

        if self.config.console {
            printed
                .and_then(|_| {
                    writeln!(self.out, "\nHTML report generated: {}", written.html_path.display())
                })
                .map_err(ReportError::Console)?;
        }

        let summary = *run.summary();
        info!(
            "Test run finished: {} passed, {} failed ({} ms)",
            summary.passed, summary.failed, summary.duration_ms
        );

        Ok(RunReport {
            summary,
            report_path: written.html_path,
            json_path: written.json_path,
        })
    }
}

/// Reporter handle for drivers whose workers record concurrently.
///
/// Every call takes the lock, so results land in the order the lock was
/// acquired.
pub struct SharedReporter<W: Write = io::Stdout> {
    inner: Arc<Mutex<Reporter<W>>>,
}

impl<W: Write> Clone for SharedReporter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: Write> SharedReporter<W> {
    pub fn new(reporter: Reporter<W>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(reporter)),
        }
    }

    pub fn begin_run(&self) -> ReportResult<()> {
        self.inner.lock().begin_run()
    }

    pub fn record_result(&self, result: TestResult) -> ReportResult<()> {
        self.inner.lock().record_result(result)
    }

    pub fn end_run(&self) -> ReportResult<RunReport> {
        self.inner.lock().end_run()
    }

    pub fn recorded(&self) -> usize {
        self.inner.lock().results().len()
    }
}
