//! Error handling module
//!
//! Defines error types and handling logic used in the project

use crate::models::ModelId;
use crate::providers::VendorError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Model identifier outside the supported set
    #[error("Invalid model specified: {0}")]
    InvalidModel(String),

    /// No API key configured for the selected provider
    #[error("API key for {0} not found")]
    MissingApiKey(ModelId),

    /// Upload with an extension other than .pdf or .txt
    #[error("Unsupported file type: {0}. Please upload a PDF or TXT file.")]
    UnsupportedFileType(String),

    /// Upload without a file or with an empty file name
    #[error("No file provided")]
    NoFileProvided,

    /// Text could not be extracted from the uploaded file
    #[error("Failed to extract text: {0}")]
    Extraction(String),

    /// Operation not allowed in the current environment
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Upstream provider call failed
    #[error(transparent)]
    VendorCall(#[from] VendorError),

    /// Request validation failed
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error body returned to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Error kind
    #[serde(rename = "type")]
    pub error_type: String,
    /// Human readable message
    pub message: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidModel(_)
            | AppError::MissingApiKey(_)
            | AppError::UnsupportedFileType(_)
            | AppError::NoFileProvided
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::VendorCall(_) => StatusCode::BAD_GATEWAY,
            AppError::Extraction(_)
            | AppError::Io(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidModel(_) => "invalid_model",
            AppError::MissingApiKey(_) => "missing_api_key",
            AppError::UnsupportedFileType(_) => "unsupported_file_type",
            AppError::NoFileProvided => "no_file_provided",
            AppError::Extraction(_) => "extraction_error",
            AppError::Forbidden(_) => "forbidden",
            AppError::VendorCall(_) => "vendor_call_failure",
            AppError::Validation(_) => "invalid_request",
            AppError::Io(_) | AppError::Internal(_) => "internal_error",
        }
    }

    /// Whether the message is safe to show to the caller
    ///
    /// Internal failures carry file paths and library diagnostics; those stay in the log.
    pub fn is_client_visible(&self) -> bool {
        !matches!(self, AppError::Io(_) | AppError::Internal(_))
    }

    /// Whether detailed error information should be logged
    pub fn should_log_details(&self) -> bool {
        self.status_code().is_server_error() || matches!(self, AppError::VendorCall(_))
    }

    /// Convert to the JSON error body
    pub fn to_error_response(&self) -> ErrorResponse {
        let message = if self.is_client_visible() {
            self.to_string()
        } else {
            "Internal server error".to_string()
        };

        ErrorResponse {
            error: ErrorDetail {
                error_type: self.error_type().to_string(),
                message,
            },
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.should_log_details() {
            tracing::error!("Application error: {} - Status code: {}", self, status);
        } else {
            tracing::warn!("Client error: {} - Status code: {}", self.error_type(), status);
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

/// Malformed or incomplete JSON bodies use the regular error body
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error context extension trait
pub trait ErrorContext<T> {
    /// Add extraction error context
    fn extraction_context(self, message: &str) -> AppResult<T>;

    /// Add internal error context
    fn internal_context(self, message: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn extraction_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Extraction(format!("{}: {}", message, e)))
    }

    fn internal_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Internal(format!("{}: {}", message, e)))
    }
}
