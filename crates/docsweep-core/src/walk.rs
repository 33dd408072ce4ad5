//! Directory traversal and per-file processing
//!
//! [`collect_files`] enumerates every file under the configured roots,
//! dropping office lock files (`~$` prefix) before anything else looks at
//! them. [`process_file`] takes one path through the full pipeline — dispatch,
//! extraction, normalization, sanitization, chunking — and folds the result
//! into a [`FileOutcome`]. All failure branches end in a warning outcome;
//! nothing here aborts the batch.

use crate::document::{extract_text, DocumentKind};
use crate::error::ExtractError;
use crate::report::{FileRecord, WarningRecord};
use crate::text::{chunk, normalize, sanitize, CELL_CHAR_LIMIT, MAX_CONTENT_CHUNKS};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Filename prefix office applications give the temporary lock file of a
/// currently open document.
const LOCK_FILE_PREFIX: &str = "~$";

/// The result of pushing one file through the pipeline.
///
/// Every file with a recognized extension produces exactly one of the first
/// two variants; unrecognized extensions produce `Skipped`, which the caller
/// drops without emitting any row.
#[derive(Debug)]
pub enum FileOutcome {
    /// Extraction succeeded; one row for the primary sheet.
    Processed(FileRecord),
    /// Extraction failed; one row for the warnings sheet.
    Warned(WarningRecord),
    /// Unrecognized extension; no row at all.
    Skipped,
}

/// Recursively collect every file under the given roots.
///
/// Lock files are filtered here, before any extension check, so they are
/// invisible to the rest of the pipeline — they are not even `Skipped`.
/// Unreadable directories are logged and passed over; no ordering is
/// guaranteed across files.
pub fn collect_files(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in roots {
        collect_files_recursive(root, &mut files);
    }
    files
}

fn collect_files_recursive(path: &Path, files: &mut Vec<PathBuf>) {
    if path.is_file() {
        if !is_lock_file(path) {
            files.push(path.to_path_buf());
        }
        return;
    }

    if !path.is_dir() {
        return;
    }

    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Failed to read directory {}: {}", path.display(), e);
            return;
        }
    };

    for entry in entries {
        let entry_path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                tracing::warn!("Failed to read entry under {}: {}", path.display(), e);
                continue;
            }
        };

        if entry_path.is_dir() {
            collect_files_recursive(&entry_path, files);
        } else if !is_lock_file(&entry_path) {
            files.push(entry_path);
        }
    }
}

fn is_lock_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(LOCK_FILE_PREFIX))
}

/// Run one file through the extraction pipeline.
pub fn process_file(path: &Path) -> FileOutcome {
    let Some(kind) = DocumentKind::from_path(path) else {
        return FileOutcome::Skipped;
    };

    match extract_text(path, kind).and_then(|raw| build_record(path, &raw)) {
        Ok(record) => FileOutcome::Processed(record),
        Err(err) => FileOutcome::Warned(WarningRecord {
            // The message itself may carry raw bytes from the failed parse
            message: sanitize(&err.to_string()),
            file_path: path.display().to_string(),
        }),
    }
}

/// Build the report row for a successfully extracted file.
fn build_record(path: &Path, raw: &str) -> Result<FileRecord, ExtractError> {
    let metadata = std::fs::metadata(path).map_err(ExtractError::generic)?;
    let modified = metadata.modified().map_err(ExtractError::generic)?;
    // Not every filesystem records a birth time; fall back to mtime
    let created = metadata.created().unwrap_or(modified);

    let cleaned = sanitize(&normalize(raw));
    let mut content_chunks = chunk(&cleaned, CELL_CHAR_LIMIT);
    let truncated = content_chunks.len() > MAX_CONTENT_CHUNKS;
    content_chunks.truncate(MAX_CONTENT_CHUNKS);

    Ok(FileRecord {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        file_path: path.display().to_string(),
        created: format_timestamp(created),
        modified: format_timestamp(modified),
        content_chunks,
        truncated,
    })
}

fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
