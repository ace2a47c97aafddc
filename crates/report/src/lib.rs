//! Storefront Test Run Reporter
//!
//! Collects the outcome of every UI test case in a run and, when the run
//! ends, produces two artifacts from the same snapshot:
//! - a plain-text summary written to the console
//! - a self-contained HTML document under the reports directory
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Test driver (external)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Reporter                                                   │
//! │    ├── begin_run()                Idle -> Running           │
//! │    ├── record_result(TestResult)  append, count             │
//! │    └── end_run() -> RunReport     Running -> Finished       │
//! │            │                                                │
//! │            ▼                                                │
//! │  FinishedRun (immutable snapshot)                           │
//! │    ├── console::render()  -> String   -> stdout             │
//! │    ├── html::render()     -> String   ┐                     │
//! │    └── RunDocument (JSON, optional)   ┴─> ReportWriter      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Results coming from Playwright's JSON reporter can be converted with
//! [`playwright::parse_report`] before being recorded.

pub mod config;
pub mod console;
pub mod error;
pub mod html;
pub mod persist;
pub mod playwright;
pub mod result;
pub mod run;
pub mod summary;

pub use config::ReporterConfig;
pub use error::{ReportError, ReportResult};
pub use persist::{ReportWriter, RunDocument};
pub use result::{TestResult, TestStatus};
pub use run::{FinishedRun, Reporter, RunReport, SharedReporter};
pub use summary::Summary;
