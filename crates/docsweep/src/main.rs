//! docsweep - batch office document content reporter
//!
//! Sweeps the configured directory trees, extracts text from PDF, Word, and
//! Excel files, and writes a consolidated `.xlsx` report with a warnings
//! sheet for files that could not be read.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use docsweep_core::{default_config_path, load_config, run};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docsweep", version, about = "Batch office document content reporter")]
struct Cli {
    /// Path to a TOML config file (defaults to the per-user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = load_config(&config_path)?;

    let summary = run(&config)?;

    println!(
        "{} {} file(s) in {:.1}s ({} warning(s), {} truncated)",
        "Done.".green().bold(),
        summary.files_processed,
        summary.elapsed.as_secs_f64(),
        summary.warnings,
        summary.truncated,
    );

    Ok(())
}
