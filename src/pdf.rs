//! Text extraction from transcript PDF documents.

use anyhow::Result;

/// Extracts the per-line text of a PDF document from raw bytes.
///
/// The result is the ordered sequence of non-empty, right-trimmed text
/// lines across all pages, ready for row reconstruction.
///
/// # Errors
///
/// Returns an error if the bytes are not a readable PDF document.
pub fn extract_lines(bytes: &[u8]) -> Result<Vec<String>> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| anyhow::anyhow!("failed to extract text from PDF: {e}"))?;
    Ok(lines_from_text(&text))
}

/// Splits extracted document text into non-empty, right-trimmed lines.
pub fn lines_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|ln| !ln.is_empty())
        .map(str::to_string)
        .collect()
}
