//! Batch orchestration
//!
//! One synchronous pass: resolve the output target, enumerate files, push
//! each through the pipeline, and route the outcome into the report. The
//! report is flushed to disk whenever the configured interval has elapsed
//! (checked once per file, no timer thread) and once unconditionally at the
//! end, so a crash loses at most one interval's worth of appends.
//!
//! Per-file failures are contained as warning rows; only failures to write
//! the report itself are fatal.

use crate::config::Config;
use crate::report::{write_workbook, OutputTarget, Report};
use crate::walk::{collect_files, process_file, FileOutcome};
use anyhow::{Context, Result};
use std::time::{Duration, Instant};

/// Counters and timing for a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub files_processed: u64,
    pub warnings: u64,
    /// Files whose content exceeded the retained chunks and was cut short.
    pub truncated: u64,
    pub elapsed: Duration,
}

/// Whether an incremental save is due.
///
/// Split out from the save itself so the cadence policy is testable without
/// touching the filesystem.
pub fn flush_due(since_last_flush: Duration, interval: Duration) -> bool {
    since_last_flush >= interval
}

/// Sweep the configured roots and write the consolidated report.
pub fn run(config: &Config) -> Result<RunSummary> {
    let started = Instant::now();

    let target = OutputTarget::resolve(&config.output_base());
    tracing::info!("Writing report to {}", target.path().display());

    let files = collect_files(&config.roots());
    tracing::info!("Found {} files under {} root(s)", files.len(), config.roots().len());

    let mut report = Report::default();
    let mut files_processed: u64 = 0;
    let mut warnings: u64 = 0;
    let mut truncated: u64 = 0;

    let interval = config.flush_interval();
    let mut last_flush = Instant::now();

    for path in files {
        match process_file(&path) {
            FileOutcome::Processed(record) => {
                if record.truncated {
                    truncated += 1;
                    tracing::warn!(
                        "Content of {} exceeds the retained chunks; extra text dropped",
                        record.file_path
                    );
                }
                report.push_record(record);
                files_processed += 1;
                tracing::info!("Files processed: {files_processed}");
            }
            FileOutcome::Warned(warning) => {
                warnings += 1;
                tracing::warn!(
                    "Failed to extract {}: {}",
                    warning.file_path,
                    warning.message
                );
                report.push_warning(warning);
            }
            FileOutcome::Skipped => {}
        }

        if flush_due(last_flush.elapsed(), interval) {
            tracing::info!("Saving workbook...");
            write_workbook(&report, &target)
                .with_context(|| format!("Failed to save report to {}", target.path().display()))?;
            last_flush = Instant::now();
            tracing::info!("Workbook saved");
        }
    }

    // Final save regardless of cadence
    write_workbook(&report, &target)
        .with_context(|| format!("Failed to save report to {}", target.path().display()))?;

    Ok(RunSummary {
        files_processed,
        warnings,
        truncated,
        elapsed: started.elapsed(),
    })
}
