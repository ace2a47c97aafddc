//! Reporter configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Directory reports are written into, created on demand
    pub reports_dir: PathBuf,

    /// Heading of the HTML report
    pub title: String,

    /// Also write a JSON summary next to the HTML report
    pub json_summary: bool,

    /// Print banners and the summary to the console
    pub console: bool,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("test-results"),
            title: "Test Execution Report".to_string(),
            json_summary: false,
            console: true,
        }
    }
}

impl ReporterConfig {
    pub fn from_yaml(yaml: &str) -> ReportResult<Self> {
        serde_yaml::from_str(yaml).map_err(ReportError::from)
    }

    pub fn from_file(path: &Path) -> ReportResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        Self::from_yaml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ReporterConfig::from_yaml("reports_dir: out/reports\njson_summary: true\n").unwrap();
        assert_eq!(config.reports_dir, PathBuf::from("out/reports"));
        assert!(config.json_summary);
        assert_eq!(config.title, "Test Execution Report");
        assert!(config.console);
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        assert!(matches!(
            ReporterConfig::from_yaml("console: maybe").unwrap_err(),
            ReportError::Yaml(_)
        ));
    }
}
