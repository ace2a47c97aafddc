//! CLI Commands

pub mod ingest;
pub mod show;
