//! Self-contained HTML report document

use std::fmt::Write;

use html_escape::encode_text;

use crate::console::display_timestamp;
use crate::result::TestResult;
use crate::run::FinishedRun;

const STYLE: &str = "\
        body { font-family: Arial, sans-serif; margin: 20px; }
        .header { background-color: #f5f5f5; padding: 20px; border-radius: 5px; }
        .summary { margin: 20px 0; }
        .test-case { margin: 10px 0; padding: 10px; border: 1px solid #ddd; border-radius: 5px; }
        .pass { background-color: #e8f5e9; }
        .fail { background-color: #ffebee; }
        .metrics { display: flex; gap: 20px; }
        .metric { flex: 1; padding: 10px; background-color: #f5f5f5; border-radius: 5px; }
        .error { color: #d32f2f; }
";

/// Build the full document for a finished run
pub fn render(run: &FinishedRun, title: &str) -> String {
    let summary = run.summary();
    let title = encode_text(title);
    let mut html = String::with_capacity(2048 + run.results().len() * 320);

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"utf-8\">\n    <title>{title}</title>\n    <style>\n{STYLE}    </style>\n</head>\n<body>\n"
    );

    let _ = write!(
        html,
        "    <div class=\"header\">\n        <h1>{title}</h1>\n        <p>Execution Date: {}</p>\n    </div>\n",
        display_timestamp(run.started_at())
    );

    html.push_str("    <div class=\"summary\">\n        <h2>Summary</h2>\n        <div class=\"metrics\">\n");
    metric(&mut html, "Total Tests", &summary.total.to_string());
    metric(&mut html, "Passed", &summary.passed.to_string());
    metric(&mut html, "Failed", &summary.failed.to_string());
    metric(&mut html, "Pass Rate", &format!("{:.2}%", summary.pass_rate()));
    metric(&mut html, "Execution Time", &format!("{:.2}s", summary.execution_secs()));
    html.push_str("        </div>\n    </div>\n");

    html.push_str("    <div class=\"details\">\n        <h2>Detailed Results</h2>\n");
    for result in run.results() {
        test_case(&mut html, result);
    }
    html.push_str("    </div>\n</body>\n</html>\n");

    html
}

fn metric(html: &mut String, label: &str, value: &str) {
    let _ = write!(
        html,
        "            <div class=\"metric\">\n                <h3>{label}</h3>\n                <p>{value}</p>\n            </div>\n"
    );
}

fn test_case(html: &mut String, result: &TestResult) {
    let _ = write!(
        html,
        "        <div class=\"test-case {}\">\n            <h3>Test Case: {}</h3>\n            <p><strong>Title:</strong> {}</p>\n            <p><strong>Status:</strong> {}</p>\n            <p><strong>Execution Time:</strong> {}ms</p>\n",
        result.status().css_class(),
        encode_text(result.id()),
        encode_text(result.title()),
        result.status(),
        result.execution_time_ms(),
    );
    if let Some(error) = result.error() {
        let _ = writeln!(
            html,
            "            <p class=\"error\"><strong>Error:</strong> {}</p>",
            encode_text(error)
        );
    }
    html.push_str("        </div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, TimeZone};

    fn run(results: Vec<TestResult>) -> FinishedRun {
        let start = Local.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        FinishedRun::new(start, start + Duration::milliseconds(330), results)
    }

    #[test]
    fn test_metrics_block() {
        let html = render(
            &run(vec![
                TestResult::passed("TC-01", "valid login", 100).unwrap(),
                TestResult::passed("TC-02", "logout", 150).unwrap(),
                TestResult::failed("TC-03", "invalid password", 80, "mismatch").unwrap(),
            ]),
            "Test Execution Report",
        );

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Test Execution Report</h1>"));
        assert!(html.contains("<p>Execution Date: 2026-10-18 09:30:00</p>"));
        assert!(html.contains("<h3>Total Tests</h3>\n                <p>3</p>"));
        assert!(html.contains("<p>66.67%</p>"));
        assert!(html.contains("<p>0.33s</p>"));
        assert_eq!(html.matches("<div class=\"test-case ").count(), 3);
        assert_eq!(html.matches("<div class=\"test-case fail\">").count(), 1);
        assert!(html.contains("<strong>Error:</strong> mismatch</p>"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = render(
            &run(vec![TestResult::failed(
                "TC-<1>",
                "error <div> shown",
                5,
                "expected \"Epic sadface\" & got <none>",
            )
            .unwrap()]),
            "Report & Co",
        );
        assert!(html.contains("<title>Report &amp; Co</title>"));
        assert!(html.contains("Test Case: TC-&lt;1&gt;"));
        assert!(html.contains("error &lt;div&gt; shown"));
        assert!(html.contains("&amp; got &lt;none&gt;"));
    }

    #[test]
    fn test_passed_case_has_no_error_paragraph() {
        let html = render(&run(vec![TestResult::passed("TC-01", "valid login", 1).unwrap()]), "R");
        assert!(!html.contains("class=\"error\""));
        assert!(html.contains("<p>100.00%</p>"));
    }
}
