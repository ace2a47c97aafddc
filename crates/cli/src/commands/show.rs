//! Inspect a persisted run summary

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use colored::Colorize;

use storefront_report::RunDocument;

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct ShowArgs {
    /// JSON summary written by `ingest --json`
    pub path: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Only list failed tests
    #[arg(long)]
    pub failed: bool,
}

pub fn execute(args: ShowArgs) -> anyhow::Result<()> {
    let doc = RunDocument::from_file(&args.path)
        .with_context(|| format!("reading run summary {}", args.path.display()))?;

    if matches!(args.format, OutputFormat::Table | OutputFormat::Plain) {
        print_header(&doc);
    }

    let rows: Vec<output::ResultRow> = doc
        .results
        .iter()
        .filter(|r| !args.failed || !r.is_pass())
        .map(output::ResultRow::from)
        .collect();

    output::print_list(&rows, args.format)
}

fn print_header(doc: &RunDocument) {
    let summary = &doc.summary;
    let failed = if summary.failed > 0 {
        summary.failed.to_string().red().bold()
    } else {
        summary.failed.to_string().normal()
    };

    println!("{}", doc.title.bold());
    println!("Execution Date: {}", doc.started_at.format("%Y-%m-%d %H:%M:%S"));
    println!(
        "Total: {}  Passed: {}  Failed: {}  Pass Rate: {:.2}%  Time: {:.2}s",
        summary.total,
        summary.passed.to_string().green(),
        failed,
        doc.pass_rate,
        summary.execution_secs()
    );
    println!();
}
