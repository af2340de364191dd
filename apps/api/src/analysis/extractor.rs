//! Text extraction — turns an uploaded PDF into plain text via `pdf-extract`.
//!
//! Pure and synchronous. Callers on the async runtime run it on the blocking pool.
//! Media-type checks happen before this is called, not here.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Not a parseable PDF (corrupt, encrypted, truncated, or not a PDF at all).
    #[error("PDF could not be read: {0}")]
    Unreadable(String),

    /// Parsed, but there is no text layer (e.g. a scanned image without OCR).
    #[error("PDF contains no extractable text")]
    NoText,
}

/// Extracts the text layer of a PDF held in memory.
///
/// Returns `NoText` when extraction succeeds but yields only whitespace.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
    if pdf_bytes.is_empty() {
        return Err(ExtractionError::Unreadable("empty document".to_string()));
    }

    // pdf-extract panics on some malformed inputs; treat that as unreadable.
    let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(pdf_bytes)
    }))
    .map_err(|_| ExtractionError::Unreadable("PDF parser aborted".to_string()))?
    .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;

    if extracted.trim().is_empty() {
        return Err(ExtractionError::NoText);
    }

    Ok(extracted)
}
