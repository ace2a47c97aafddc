//! Storefront report CLI - Main Entry Point
//!
//! Feeds Playwright results for the storefront UI suites through the run
//! reporter and inspects persisted run summaries.

use clap::{Parser, Subcommand};
use colored::Colorize;

mod commands;
mod output;

use commands::{ingest, show};

#[derive(Parser)]
#[command(name = "storefront-report")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record Playwright JSON results as one run and write its reports
    Ingest(ingest::IngestArgs),

    /// Print a persisted JSON run summary
    Show(show::ShowArgs),
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Ingest(args) => ingest::execute(args),
        Commands::Show(args) => show::execute(args).map(|_| true),
    };

    match result {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(2);
        }
    }
}
