//! Plain-text extraction from uploaded PDFs, so clients can send a resume file
//! instead of pasting its text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("upload is not a PDF document")]
    NotPdf,

    #[error("could not extract text: {0}")]
    Unreadable(String),

    #[error("PDF contains no extractable text")]
    NoText,
}

/// Magic-byte check; content types from browsers are unreliable.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF-")
}

/// Collapses runs of whitespace within each line, trims lines and drops blank
/// ones.
pub fn normalize_whitespace(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extracts text synchronously. CPU-bound; call through
/// [`extract_text`] from async code.
pub fn extract_text_sync(bytes: &[u8]) -> Result<String, ExtractError> {
    if !looks_like_pdf(bytes) {
        return Err(ExtractError::NotPdf);
    }
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractError::Unreadable(e.to_string()))?;
    let text = normalize_whitespace(&raw);
    if text.is_empty() {
        return Err(ExtractError::NoText);
    }
    Ok(text)
}

/// Runs [`extract_text_sync`] on the blocking pool. A panic inside the PDF
/// parser is reported as an unreadable document.
pub async fn extract_text(bytes: Vec<u8>) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || extract_text_sync(&bytes))
        .await
        .map_err(|e| ExtractError::Unreadable(format!("extraction task failed: {e}")))?
}
