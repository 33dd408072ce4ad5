//! Error types for extraction and report writing.
//!
//! Extraction errors are classified but contained: every failure becomes a
//! warning row at single-file granularity and never aborts the batch. Report
//! errors are the opposite: if the workbook cannot be written there is
//! nothing useful left to do, so they propagate out of the run.

use thiserror::Error;

/// A classified failure from one of the content extractors.
///
/// The PDF-structure variant exists because corrupt PDFs are common enough in
/// the source domain to deserve a dedicated diagnostic; both variants are
/// reported identically downstream (a row on the warnings sheet), so the
/// distinction is observability-only.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Malformed or unreadable PDF structure.
    #[error("malformed PDF structure: {0}")]
    PdfStructure(#[from] lopdf::Error),

    /// Any other failure from any extractor, including I/O.
    #[error("{0}")]
    Extraction(String),
}

impl ExtractError {
    /// Wrap an arbitrary extractor failure as a generic extraction error.
    pub fn generic(err: impl std::fmt::Display) -> Self {
        Self::Extraction(err.to_string())
    }
}

/// A failure while resolving or writing the report workbook. Fatal.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Error from the workbook writer.
    #[error("failed to write workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// Filesystem error while probing or writing the output path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
