//! Upload handler
//!
//! POST /upload extracts the text of a PDF or TXT file

use crate::models::ExtractedDocument;
use crate::services::DocumentKind;
use crate::utils::error::{AppError, AppResult, ErrorContext};
use axum::{extract::Multipart, Json};
use tracing::debug;

/// Multipart field carrying the file
const FILE_FIELD: &str = "file";

/// Handle file uploads
///
/// POST /upload
pub async fn upload_file(mut multipart: Multipart) -> AppResult<Json<ExtractedDocument>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        // Type is decided from the name alone, before the body is read
        let kind = DocumentKind::detect(&file_name)?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {}", e)))?;

        debug!("Extracting text from {} ({} bytes, {:?})", file_name, bytes.len(), kind);

        let text = match kind {
            DocumentKind::Pdf => tokio::task::spawn_blocking(move || kind.extract(&bytes))
                .await
                .internal_context("PDF extraction task failed")??,
            DocumentKind::Text => kind.extract(&bytes)?,
        };

        return Ok(Json(ExtractedDocument { text }));
    }

    Err(AppError::NoFileProvided)
}
