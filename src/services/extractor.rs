//! Text extraction
//!
//! Turns uploaded PDF and TXT files into plain text

use crate::utils::error::{AppError, AppResult, ErrorContext};
use lopdf::Document;
use std::path::Path;
use tracing::debug;

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    /// Pick the format from the file name's extension (case-insensitive)
    pub fn detect(file_name: &str) -> AppResult<Self> {
        if file_name.trim().is_empty() {
            return Err(AppError::NoFileProvided);
        }

        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("txt") => Ok(DocumentKind::Text),
            Some(other) => Err(AppError::UnsupportedFileType(format!(".{}", other))),
            None => Err(AppError::UnsupportedFileType(file_name.to_string())),
        }
    }

    /// Extract the text of `bytes`
    pub fn extract(self, bytes: &[u8]) -> AppResult<String> {
        match self {
            DocumentKind::Pdf => extract_pdf(bytes),
            DocumentKind::Text => String::from_utf8(bytes.to_vec())
                .extraction_context("File is not valid UTF-8 text"),
        }
    }
}

/// Extract text from an uploaded file
pub fn extract_text(bytes: &[u8], file_name: &str) -> AppResult<String> {
    DocumentKind::detect(file_name)?.extract(bytes)
}

/// Concatenate the text of every page in document order
fn extract_pdf(bytes: &[u8]) -> AppResult<String> {
    let document = Document::load_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("Error processing PDF: {}", e)))?;

    let pages = document.get_pages();
    debug!("Extracting text from {} PDF pages", pages.len());

    let mut text = String::new();
    // get_pages is keyed by page number, so iteration follows document order
    for page_number in pages.keys() {
        let page_text = document
            .extract_text(&[*page_number])
            .map_err(|e| AppError::Extraction(format!("Error processing PDF page {}: {}", page_number, e)))?;
        text.push_str(&page_text);
    }

    Ok(text)
}
