//! Aggregate metrics derived from a run's results

use serde::{Deserialize, Serialize};

use crate::result::TestResult;

/// Counts and rates for a finished run.
///
/// `total == passed + failed` always holds. With no results both rates are
/// reported as 0%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

impl Summary {
    pub fn from_results(results: &[TestResult], duration_ms: u64) -> Self {
        let passed = results.iter().filter(|r| r.is_pass()).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            duration_ms,
        }
    }

    pub fn pass_rate(&self) -> f64 {
        self.rate(self.passed)
    }

    pub fn fail_rate(&self) -> f64 {
        self.rate(self.failed)
    }

    /// Wall-clock run time in seconds
    pub fn execution_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        count as f64 / self.total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> Vec<TestResult> {
        vec![
            TestResult::passed("TC-01", "valid login", 100).unwrap(),
            TestResult::passed("TC-02", "logout", 150).unwrap(),
            TestResult::failed("TC-03", "invalid password", 80, "mismatch").unwrap(),
        ]
    }

    #[test]
    fn test_counts_and_rates() {
        let summary = Summary::from_results(&results(), 2_500);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert!((summary.pass_rate() - 66.666).abs() < 0.01);
        assert!((summary.fail_rate() - 33.333).abs() < 0.01);
        assert!((summary.pass_rate() + summary.fail_rate() - 100.0).abs() < 1e-9);
        assert_eq!(summary.execution_secs(), 2.5);
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_empty_run_has_zero_rates() {
        let summary = Summary::from_results(&[], 0);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.pass_rate(), 0.0);
        assert_eq!(summary.fail_rate(), 0.0);
        assert!(summary.all_passed());
    }
}
