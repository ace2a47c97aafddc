//! Outcome of a single test case

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Pass,
    Fail,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
        }
    }

    /// Class name used to style the entry in the HTML report
    pub fn css_class(&self) -> &'static str {
        match self {
            TestStatus::Pass => "pass",
            TestStatus::Fail => "fail",
        }
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recorded outcome of one test case.
///
/// A failed result always carries a non-blank error and a passed result
/// never does. Every constructor (and deserialization) checks this, so the
/// fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTestResult")]
pub struct TestResult {
    id: String,
    title: String,
    status: TestStatus,
    execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Deserialize)]
struct RawTestResult {
    id: String,
    title: String,
    status: TestStatus,
    execution_time_ms: u64,
    #[serde(default)]
    error: Option<String>,
}

impl TryFrom<RawTestResult> for TestResult {
    type Error = ReportError;

    fn try_from(raw: RawTestResult) -> ReportResult<Self> {
        TestResult::new(raw.id, raw.title, raw.status, raw.execution_time_ms, raw.error)
    }
}

impl TestResult {
    /// Build a result, checking that `error` is present exactly when the
    /// status is [`TestStatus::Fail`]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        status: TestStatus,
        execution_time_ms: u64,
        error: Option<String>,
    ) -> ReportResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ReportError::InvalidResult("test id must not be empty".into()));
        }

        let error = error.filter(|e| !e.trim().is_empty());
        match (status, &error) {
            (TestStatus::Fail, None) => {
                return Err(ReportError::InvalidResult(format!(
                    "{}: failed result requires an error message",
                    id
                )));
            }
            (TestStatus::Pass, Some(_)) => {
                return Err(ReportError::InvalidResult(format!(
                    "{}: passed result must not carry an error",
                    id
                )));
            }
            _ => {}
        }

        Ok(Self {
            id,
            title: title.into(),
            status,
            execution_time_ms,
            error,
        })
    }

    pub fn passed(
        id: impl Into<String>,
        title: impl Into<String>,
        execution_time_ms: u64,
    ) -> ReportResult<Self> {
        Self::new(id, title, TestStatus::Pass, execution_time_ms, None)
    }

    pub fn failed(
        id: impl Into<String>,
        title: impl Into<String>,
        execution_time_ms: u64,
        error: impl Into<String>,
    ) -> ReportResult<Self> {
        Self::new(id, title, TestStatus::Fail, execution_time_ms, Some(error.into()))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> TestStatus {
        self.status
    }

    pub fn execution_time_ms(&self) -> u64 {
        self.execution_time_ms
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_pass(&self) -> bool {
        self.status == TestStatus::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_requires_error() {
        let err = TestResult::failed("TC-02", "invalid username", 80, "   ").unwrap_err();
        assert!(matches!(err, ReportError::InvalidResult(_)));
    }

    #[test]
    fn test_passed_rejects_error() {
        let err = TestResult::new("TC-01", "valid login", TestStatus::Pass, 100, Some("boom".into()))
            .unwrap_err();
        assert!(matches!(err, ReportError::InvalidResult(_)));
    }

    #[test]
    fn test_blank_error_on_pass_is_dropped() {
        let result = TestResult::new("TC-01", "valid login", TestStatus::Pass, 100, Some(String::new())).unwrap();
        assert_eq!(result.error(), None);
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(TestResult::passed("", "no id", 1).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"id":"TC-03","title":"bad password","status":"FAIL","execution_time_ms":12}"#;
        let err = serde_json::from_str::<TestResult>(json).unwrap_err();
        assert!(err.to_string().contains("requires an error"));

        let json = r#"{"id":"TC-03","title":"bad password","status":"FAIL","execution_time_ms":12,"error":"mismatch"}"#;
        let result: TestResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.status(), TestStatus::Fail);
        assert_eq!(result.error(), Some("mismatch"));
    }

    #[test]
    fn test_pass_serializes_without_error_field() {
        let result = TestResult::passed("TC-01", "valid login", 100).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "PASS");
        assert!(json.get("error").is_none());
    }
}
