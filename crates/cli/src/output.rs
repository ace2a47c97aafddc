//! Output formatting for CLI

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use storefront_report::{TestResult, TestStatus};

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Plain text format
    Plain,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;

    /// Colour for the row's status cell, if any
    fn highlight(&self) -> Option<Color> {
        None
    }
}

/// One recorded test result as shown by `show`
#[derive(Debug, Serialize)]
pub struct ResultRow {
    pub id: String,
    pub title: String,
    pub status: TestStatus,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&TestResult> for ResultRow {
    fn from(result: &TestResult) -> Self {
        Self {
            id: result.id().to_string(),
            title: result.title().to_string(),
            status: result.status(),
            execution_time_ms: result.execution_time_ms(),
            error: result.error().map(str::to_string),
        }
    }
}

impl TableDisplay for ResultRow {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Title", "Status", "Time (ms)", "Error"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.status.to_string(),
            self.execution_time_ms.to_string(),
            self.error.clone().unwrap_or_default(),
        ]
    }

    fn highlight(&self) -> Option<Color> {
        match self.status {
            TestStatus::Pass => Some(Color::Green),
            TestStatus::Fail => Some(Color::Red),
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + TableDisplay>(
    items: &[T],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items)?);
            return Ok(());
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(items)?);
            return Ok(());
        }
        _ => {}
    }

    if items.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(T::headers());
            for item in items {
                let cells = item.row().into_iter().enumerate().map(|(i, value)| {
                    let cell = Cell::new(value);
                    match (i, item.highlight()) {
                        (2, Some(color)) => cell.fg(color),
                        _ => cell,
                    }
                });
                table.add_row(cells);
            }

            println!("{table}");
        }
        _ => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    println!("---");
                }
                let row = item.row();
                for (header, value) in T::headers().iter().zip(row.iter()) {
                    if !value.is_empty() {
                        println!("{}: {}", header, value);
                    }
                }
            }
        }
    }
    Ok(())
}
