//! Provider module
//!
//! Defines the Provider trait and one adapter per upstream vendor

pub mod claude;
pub mod gemini;
pub mod openai;
pub mod perplexity;

use crate::models::ModelId;
use crate::utils::logging::truncate_content;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Longest upstream error body kept in an error message
const MAX_ERROR_BODY: usize = 500;

/// Provider trait for upstream LLM vendors
///
/// An adapter turns one prompt into one HTTP request in its vendor's schema
/// and pulls the reply text out of the vendor's response.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Model this adapter serves
    fn id(&self) -> ModelId;

    /// Send the prompt and return the reply text
    async fn call(&self, prompt: &str, api_key: &str) -> Result<String, VendorError>;
}

/// Why a vendor call failed
#[derive(Error, Debug)]
pub enum VendorFailure {
    /// Connection, TLS, timeout or body read failure
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// Vendor answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Body was not JSON or lacked the reply text field
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Failed call to a vendor
///
/// Displays as `Error calling <Vendor>: <details>`.
#[derive(Error, Debug)]
#[error("Error calling {}: {}", ModelId::display_name(.provider), .cause)]
pub struct VendorError {
    pub provider: ModelId,
    #[source]
    pub cause: VendorFailure,
}

impl VendorError {
    pub fn new(provider: ModelId, cause: VendorFailure) -> Self {
        Self { provider, cause }
    }

    /// HTTP status returned by the vendor, if it answered at all
    pub fn upstream_status(&self) -> Option<StatusCode> {
        match &self.cause {
            VendorFailure::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Create the HTTP client shared by all adapters
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(concat!("aichat-gateway/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to create HTTP client")
}

/// Join a base URL and a path
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Send a request and decode a 2xx JSON body
pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, VendorFailure> {
    let response = request.send().await.map_err(VendorFailure::Transport)?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(VendorFailure::Status {
            status,
            body: truncate_content(&body, MAX_ERROR_BODY),
        });
    }

    let bytes = response.bytes().await.map_err(VendorFailure::Transport)?;
    serde_json::from_slice(&bytes).map_err(|e| VendorFailure::MalformedResponse(e.to_string()))
}

pub use claude::ClaudeProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAIProvider;
pub use perplexity::PerplexityProvider;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(endpoint_url("https://api.openai.com/v1", "chat/completions"), "https://api.openai.com/v1/chat/completions");
        assert_eq!(endpoint_url("https://api.openai.com/v1/", "/chat/completions"), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_vendor_error_display() {
        let err = VendorError::new(
            ModelId::Perplexity,
            VendorFailure::Status { status: StatusCode::UNAUTHORIZED, body: "invalid key".to_string() },
        );

        assert_eq!(err.to_string(), "Error calling Perplexity: HTTP 401 Unauthorized: invalid key");
        assert_eq!(err.upstream_status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(None).is_ok());
        assert!(build_client(Some(Duration::from_secs(5))).is_ok());
    }
}
