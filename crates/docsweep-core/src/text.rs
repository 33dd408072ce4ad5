//! Text preparation for tabular storage
//!
//! Extracted document text is arbitrary: it can contain control characters
//! that an `.xlsx` cell cannot store, multi-line layout that makes a one-row
//! representation unreadable, and more characters than fit in a single cell.
//! This module provides the three transforms applied between extraction and
//! the report:
//!
//! - [`sanitize`]: strip control characters the workbook format rejects
//! - [`normalize`]: collapse whitespace into a single scannable line
//! - [`chunk`]: split into cell-sized pieces

/// Maximum characters Excel allows in a single cell.
pub const CELL_CHAR_LIMIT: usize = 32_767;

/// Number of content chunks retained per file (columns `File Contents 1..3`).
/// Content beyond this is dropped; callers count and log the truncation.
pub const MAX_CONTENT_CHUNKS: usize = 3;

/// C0 controls that cannot be stored in a workbook cell.
///
/// Tab, line feed, and carriage return are excluded: those are collapsed by
/// [`normalize`] rather than stripped here, so that error messages (which are
/// sanitized but never normalized) keep their line structure readable.
fn is_illegal_char(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}')
}

/// Remove control characters the workbook format cannot store.
///
/// Pure and total: never fails, and applying it twice gives the same result
/// as applying it once. Used on extracted content and on error messages,
/// since a failed parse can embed raw bytes in its message.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !is_illegal_char(*c)).collect()
}

/// Collapse whitespace so a multi-line document reads as a single line.
///
/// Every run of consecutive whitespace becomes one separator: a semicolon if
/// the run contained a line break (so former line structure stays visible in
/// a one-cell rendering), otherwise a single space. Leading and trailing
/// whitespace is dropped.
///
/// Applied to file content only; error messages are sanitized but not
/// normalized.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    let mut run_had_break = false;

    for c in text.chars() {
        if c.is_whitespace() {
            in_run = true;
            if c == '\n' || c == '\r' {
                run_had_break = true;
            }
        } else {
            if in_run && !out.is_empty() {
                out.push(if run_had_break { ';' } else { ' ' });
            }
            in_run = false;
            run_had_break = false;
            out.push(c);
        }
    }

    out
}

/// Split text into consecutive chunks of at most `max_len` characters.
///
/// Order-preserving and non-overlapping: concatenating the result reproduces
/// the input exactly. Splits on character boundaries, never inside a UTF-8
/// sequence. An empty input yields one empty chunk, matching range-based
/// slicing semantics.
///
/// This exists solely to fit text into cell-size-limited storage; it makes no
/// attempt at semantic segmentation.
pub fn chunk(text: &str, max_len: usize) -> Vec<String> {
    debug_assert!(max_len > 0, "chunk length must be non-zero");

    if text.is_empty() {
        return vec![String::new()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for c in text.chars() {
        if count == max_len {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(c);
        count += 1;
    }
    chunks.push(current);

    chunks
}
