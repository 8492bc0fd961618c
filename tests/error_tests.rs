//! Error response tests

use aichat_gateway::providers::{VendorError, VendorFailure};
use aichat_gateway::{AppError, ModelId};
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[test]
fn test_client_errors() {
    let cases = [
        (AppError::InvalidModel("mistral".to_string()), "invalid_model"),
        (AppError::MissingApiKey(ModelId::Gemini), "missing_api_key"),
        (AppError::UnsupportedFileType(".docx".to_string()), "unsupported_file_type"),
        (AppError::NoFileProvided, "no_file_provided"),
        (AppError::Validation("bad body".to_string()), "invalid_request"),
    ];

    for (error, error_type) in cases {
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.error_type(), error_type);
        assert!(error.is_client_visible());
        assert!(!error.should_log_details());
    }
}

#[test]
fn test_error_messages() {
    assert_eq!(
        AppError::InvalidModel("mistral".to_string()).to_string(),
        "Invalid model specified: mistral"
    );
    assert_eq!(
        AppError::MissingApiKey(ModelId::Perplexity).to_string(),
        "API key for perplexity not found"
    );
    assert_eq!(
        AppError::UnsupportedFileType(".docx".to_string()).to_string(),
        "Unsupported file type: .docx. Please upload a PDF or TXT file."
    );
}

#[test]
fn test_server_errors_hide_details() {
    let errors = [
        AppError::Internal("lock poisoned".to_string()),
        AppError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/srv/.env")),
        AppError::Internal("PDF extraction task failed: task panicked".to_string()),
    ];

    for error in errors {
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.should_log_details());

        let body = error.to_error_response();
        assert_eq!(body.error.error_type, "internal_error");
        assert_eq!(body.error.message, "Internal server error");
    }
}

#[test]
fn test_extraction_error_is_visible() {
    let error = AppError::Extraction("Error processing PDF: invalid file header".to_string());

    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = error.to_error_response();
    assert_eq!(body.error.error_type, "extraction_error");
    assert!(body.error.message.contains("Error processing PDF"));
}

#[test]
fn test_vendor_error_response() {
    let error: AppError = VendorError::new(
        ModelId::Claude,
        VendorFailure::Status {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            body: "rate limited".to_string(),
        },
    )
    .into();

    assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
    assert!(error.should_log_details());

    let body = error.to_error_response();
    assert_eq!(body.error.error_type, "vendor_call_failure");
    assert_eq!(
        body.error.message,
        "Error calling Claude: HTTP 429 Too Many Requests: rate limited"
    );
}

#[test]
fn test_into_response_status() {
    let response = AppError::Forbidden("Storing keys to disk is not allowed in production.".to_string())
        .into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = AppError::NoFileProvided.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
