//! Plain-text run summary

use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::run::FinishedRun;

/// Localized timestamp shown in banners and report headers
pub fn display_timestamp(ts: DateTime<Local>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn display_date(ts: DateTime<Local>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

pub fn start_banner(started_at: DateTime<Local>) -> String {
    format!(
        "\n=== Test Execution Started at: {} ===\n\n",
        display_timestamp(started_at)
    )
}

/// Render the end-of-run summary followed by every result in recorded order
pub fn render(run: &FinishedRun) -> String {
    let summary = run.summary();
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "\n=== Test Execution Report ===");
    let _ = writeln!(out, "Execution Date: {}", display_date(run.started_at()));
    let _ = writeln!(out, "Total Test Cases: {}", summary.total);
    let _ = writeln!(out, "Passed: {}", summary.passed);
    let _ = writeln!(out, "Failed: {}", summary.failed);
    let _ = writeln!(out, "Pass Rate: {:.2}%", summary.pass_rate());
    let _ = writeln!(out, "Fail Rate: {:.2}%", summary.fail_rate());
    let _ = writeln!(out, "Execution Time: {:.2} seconds", summary.execution_secs());

    let _ = writeln!(out, "\n=== Detailed Results ===");
    for result in run.results() {
        let _ = writeln!(out, "\nTest Case: {}", result.id());
        let _ = writeln!(out, "Title: {}", result.title());
        let _ = writeln!(out, "Status: {}", result.status());
        let _ = writeln!(out, "Execution Time: {}ms", result.execution_time_ms());
        if let Some(error) = result.error() {
            let _ = writeln!(out, "Error: {}", error);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::TestResult;
    use chrono::{Duration, TimeZone};

    fn run(results: Vec<TestResult>) -> FinishedRun {
        let start = Local.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        FinishedRun::new(start, start + Duration::milliseconds(1_234), results)
    }

    #[test]
    fn test_summary_lines_in_order() {
        let out = render(&run(vec![
            TestResult::passed("TC-01", "valid login", 100).unwrap(),
            TestResult::failed("TC-02", "locked out user", 80, "mismatch").unwrap(),
        ]));

        let expected_prefix = "\n=== Test Execution Report ===\n\
            Execution Date: 2026-10-18\n\
            Total Test Cases: 2\n\
            Passed: 1\n\
            Failed: 1\n\
            Pass Rate: 50.00%\n\
            Fail Rate: 50.00%\n\
            Execution Time: 1.23 seconds\n\
            \n=== Detailed Results ===\n";
        assert!(out.starts_with(expected_prefix), "got:\n{}", out);

        let first = out.find("Test Case: TC-01").unwrap();
        let second = out.find("Test Case: TC-02").unwrap();
        assert!(first < second);
        assert!(out.contains("Status: FAIL\nExecution Time: 80ms\nError: mismatch\n"));
    }

    #[test]
    fn test_pass_has_no_error_line() {
        let out = render(&run(vec![TestResult::passed("TC-01", "valid login", 100).unwrap()]));
        assert!(!out.contains("Error:"));
    }

    #[test]
    fn test_empty_run_renders_zero_rates() {
        let out = render(&run(vec![]));
        assert!(out.contains("Total Test Cases: 0\n"));
        assert!(out.contains("Pass Rate: 0.00%\n"));
        assert!(out.contains("Fail Rate: 0.00%\n"));
    }

    #[test]
    fn test_start_banner() {
        let start = Local.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        assert_eq!(
            start_banner(start),
            "\n=== Test Execution Started at: 2026-10-18 09:30:00 ===\n\n"
        );
    }
}
