//! Document text extraction for the supported office formats
//!
//! Dispatch is by file extension, matched exactly and case-sensitively
//! against a fixed table: `.pdf`, `.doc`/`.docx`, and `.xls`/`.xlsx`. Any
//! other extension is not an error; it is simply outside the report's scope
//! and [`DocumentKind::from_path`] returns `None` so the caller emits no row.
//!
//! All extractors are pure Rust:
//! - PDF via `lopdf` (structural validation) + `pdf-extract` (text)
//! - Word via `docx-lite`
//! - Spreadsheets via `calamine`

use crate::error::ExtractError;
use std::path::Path;

/// The handler a file dispatches to, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
    Spreadsheet,
}

impl DocumentKind {
    /// Resolve the handler for a path, or `None` for unrecognized extensions.
    ///
    /// The match is exact and case-sensitive (`.PDF` does not dispatch), and
    /// `None` is the skip sentinel: such files produce no report row at all.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("pdf") => Some(Self::Pdf),
            Some("doc" | "docx") => Some(Self::Word),
            Some("xls" | "xlsx") => Some(Self::Spreadsheet),
            _ => None,
        }
    }
}

/// Extract best-effort plain text from a document file.
///
/// Failures are classified by [`ExtractError`] but never panic; the caller
/// converts them to warning rows.
pub fn extract_text(path: &Path, kind: DocumentKind) -> Result<String, ExtractError> {
    match kind {
        DocumentKind::Pdf => extract_pdf_text(path),
        DocumentKind::Word => extract_word_text(path),
        DocumentKind::Spreadsheet => extract_spreadsheet_text(path),
    }
}

/// Extract text from a PDF file.
///
/// The bytes are loaded through `lopdf` first as a structural check: corrupt
/// PDFs are the dominant failure mode in this domain, and a load failure gets
/// the dedicated [`ExtractError::PdfStructure`] classification. Text then
/// comes from `pdf-extract`, whose failures are generic.
fn extract_pdf_text(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(ExtractError::generic)?;

    lopdf::Document::load_mem(&bytes)?;

    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(ExtractError::generic)?;
    tracing::debug!("PDF extracted: {} chars", text.len());
    Ok(text)
}

/// Extract text from a Word document using docx-lite.
///
/// Legacy binary `.doc` files are routed here by the dispatch table as well;
/// docx-lite cannot read them, so they surface as generic extraction
/// failures and end up on the warnings sheet.
fn extract_word_text(path: &Path) -> Result<String, ExtractError> {
    docx_lite::extract_text(path).map_err(ExtractError::generic)
}

/// Extract text from a spreadsheet using calamine.
///
/// Each sheet becomes a `## <name>` header followed by one line per occupied
/// row, cells separated by tabs. Rows with no occupied cell are dropped. The
/// tab and newline structure is provisional: the normalizer later collapses
/// it into the single-line cell representation.
fn extract_spreadsheet_text(path: &Path) -> Result<String, ExtractError> {
    use calamine::{open_workbook_auto, Data, Reader};

    let mut workbook = open_workbook_auto(path).map_err(ExtractError::generic)?;

    let mut text = String::new();
    for name in workbook.sheet_names().to_vec() {
        let Ok(range) = workbook.worksheet_range(&name) else {
            continue;
        };

        text.push_str(&format!("## {name}\n\n"));
        for row in range.rows() {
            if row.iter().all(|cell| matches!(cell, Data::Empty)) {
                continue;
            }
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    text.push('\t');
                }
                text.push_str(&cell_text(cell));
            }
            text.push('\n');
        }
        text.push('\n');
    }

    Ok(text)
}

fn cell_text(cell: &calamine::Data) -> String {
    use calamine::Data;

    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::Error(e) => format!("#{e:?}"),
    }
}
