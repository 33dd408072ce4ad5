//! docsweep-core — batch office document content reporting
//!
//! Walks one or more directory trees, extracts plain text from every PDF,
//! Word, and Excel file it finds, and consolidates the results into a single
//! `.xlsx` report: one sheet of per-file content rows, one sheet of warning
//! rows for files that failed extraction. A bad file never aborts the batch,
//! and the report is saved incrementally so an interrupted run keeps most of
//! its work.
//!
//! Module map:
//! - [`text`]: sanitize / normalize / chunk transforms
//! - [`document`]: extension dispatch and per-format extractors
//! - [`walk`]: traversal, lock-file filtering, per-file outcomes
//! - [`report`]: append-only report model, output naming, workbook writer
//! - [`config`]: TOML configuration with defaults
//! - [`run`]: the single-pass orchestrator

pub mod config;
pub mod document;
pub mod error;
pub mod report;
pub mod run;
pub mod text;
pub mod walk;

pub use config::{default_config_path, load_config, Config};
pub use document::{extract_text, DocumentKind};
pub use error::{ExtractError, ReportError};
pub use report::{write_workbook, FileRecord, OutputTarget, Report, WarningRecord};
pub use run::{run, RunSummary};
pub use text::{chunk, normalize, sanitize, CELL_CHAR_LIMIT, MAX_CONTENT_CHUNKS};
pub use walk::{collect_files, process_file, FileOutcome};
