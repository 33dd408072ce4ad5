//! Report model and workbook writer
//!
//! The report is an append-only in-memory log: one [`FileRecord`] per
//! successfully extracted file, one [`WarningRecord`] per failure. Appends
//! only mutate memory and cannot fail; [`write_workbook`] serializes the full
//! current state to the resolved `.xlsx` target, overwriting whatever is
//! there. Rewriting the whole state on every flush keeps the flush idempotent
//! (same state in, same bytes out) and bounds data loss on a crash to the
//! appends since the last flush.

use crate::error::ReportError;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook};
use std::path::{Path, PathBuf};

/// Header row of the primary sheet.
const CONTENT_HEADERS: [&str; 7] = [
    "File Name",
    "File Path",
    "Date Created",
    "Date Last Modified",
    "File Contents 1",
    "File Contents 2",
    "File Contents 3",
];

/// One row on the primary sheet: a successfully processed file.
///
/// Immutable after creation. Timestamps are preformatted
/// `YYYY-MM-DD HH:MM:SS` strings; `content_chunks` holds at most
/// [`crate::text::MAX_CONTENT_CHUNKS`] cell-sized pieces.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub file_name: String,
    pub file_path: String,
    pub created: String,
    pub modified: String,
    pub content_chunks: Vec<String>,
    /// True when the document held more text than the retained chunks.
    /// Observability only; not written to the workbook.
    pub truncated: bool,
}

/// One row on the warnings sheet: a file that failed extraction.
#[derive(Debug, Clone)]
pub struct WarningRecord {
    /// Sanitized error message (a failed parse can embed raw bytes).
    pub message: String,
    pub file_path: String,
}

/// Append-only accumulation of report rows.
#[derive(Debug, Default)]
pub struct Report {
    records: Vec<FileRecord>,
    warnings: Vec<WarningRecord>,
}

impl Report {
    pub fn push_record(&mut self, record: FileRecord) {
        self.records.push(record);
    }

    pub fn push_warning(&mut self, warning: WarningRecord) {
        self.warnings.push(warning);
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn warnings(&self) -> &[WarningRecord] {
        &self.warnings
    }
}

/// The resolved output location, fixed for the whole run.
#[derive(Debug, Clone)]
pub struct OutputTarget {
    path: PathBuf,
}

impl OutputTarget {
    /// Probe `base` for name collisions and pick the first unused path.
    ///
    /// Given `X.ext`, tries `X.ext`, then `X_1.ext`, `X_2.ext`, … so reruns
    /// never clobber an earlier run's report.
    pub fn resolve(base: &Path) -> Self {
        if !base.exists() {
            return Self {
                path: base.to_path_buf(),
            };
        }

        let stem = base
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let ext = base.extension().and_then(|e| e.to_str());

        let mut count = 1;
        loop {
            let name = match ext {
                Some(ext) => format!("{stem}_{count}.{ext}"),
                None => format!("{stem}_{count}"),
            };
            let candidate = base.with_file_name(name);
            if !candidate.exists() {
                return Self { path: candidate };
            }
            count += 1;
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Serialize the full report state to the target workbook.
///
/// Sheet `Contents` carries the per-file rows under [`CONTENT_HEADERS`];
/// sheet `Warnings` carries `(error, file path)` rows. The previous file at
/// the target is fully overwritten. Safe to call repeatedly mid-run.
pub fn write_workbook(report: &Report, target: &OutputTarget) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();

    // Pin the workbook creation timestamp so flushing unchanged state
    // produces byte-identical files.
    let properties =
        DocProperties::new().set_creation_datetime(&ExcelDateTime::from_ymd(2000, 1, 1)?);
    workbook.set_properties(&properties);

    let contents = workbook.add_worksheet();
    contents.set_name("Contents")?;
    for (col, header) in CONTENT_HEADERS.iter().enumerate() {
        contents.write_string(0, col as u16, *header)?;
    }
    for (i, record) in report.records.iter().enumerate() {
        let row = (i + 1) as u32;
        contents.write_string(row, 0, record.file_name.as_str())?;
        contents.write_string(row, 1, record.file_path.as_str())?;
        contents.write_string(row, 2, record.created.as_str())?;
        contents.write_string(row, 3, record.modified.as_str())?;
        for (j, chunk) in record.content_chunks.iter().enumerate() {
            contents.write_string(row, (4 + j) as u16, chunk.as_str())?;
        }
    }

    let warnings = workbook.add_worksheet();
    warnings.set_name("Warnings")?;
    warnings.write_string(0, 0, "Error")?;
    warnings.write_string(0, 1, "File Path")?;
    for (i, warning) in report.warnings.iter().enumerate() {
        let row = (i + 1) as u32;
        warnings.write_string(row, 0, warning.message.as_str())?;
        warnings.write_string(row, 1, warning.file_path.as_str())?;
    }

    workbook.save(target.path())?;
    Ok(())
}
