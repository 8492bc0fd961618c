//! Claude Provider implementation
//!
//! Anthropic Messages API authenticated with x-api-key and anthropic-version headers

use super::{endpoint_url, send_json, Provider, VendorError, VendorFailure};
use crate::config::EndpointConfig;
use crate::models::claude::{MessagesRequest, MessagesResponse};
use crate::models::ModelId;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Claude Provider
pub struct ClaudeProvider {
    client: Client,
    base_url: String,
    model: String,
    anthropic_version: String,
    max_tokens: u32,
}

impl ClaudeProvider {
    pub fn new(client: Client, endpoint: &EndpointConfig, anthropic_version: &str, max_tokens: u32) -> Self {
        Self {
            client,
            base_url: endpoint.base_url.clone(),
            model: endpoint.model.clone(),
            anthropic_version: anthropic_version.to_string(),
            max_tokens,
        }
    }
}

#[async_trait]
impl Provider for ClaudeProvider {
    fn id(&self) -> ModelId {
        ModelId::Claude
    }

    async fn call(&self, prompt: &str, api_key: &str) -> Result<String, VendorError> {
        debug!("Sending Claude messages request with model {}", self.model);

        let request = self.client
            .post(endpoint_url(&self.base_url, "messages"))
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.anthropic_version)
            .json(&MessagesRequest::user_prompt(&self.model, self.max_tokens, prompt));

        let response: MessagesResponse = send_json(request)
            .await
            .map_err(|cause| VendorError::new(self.id(), cause))?;

        response.into_text().ok_or_else(|| {
            VendorError::new(
                self.id(),
                VendorFailure::MalformedResponse("missing content[0].text".to_string()),
            )
        })
    }
}
