//! Perplexity Provider implementation
//!
//! Perplexity exposes an OpenAI-compatible chat completions endpoint

use super::{endpoint_url, send_json, Provider, VendorError, VendorFailure};
use crate::config::EndpointConfig;
use crate::models::openai::{ChatCompletionRequest, ChatCompletionResponse};
use crate::models::ModelId;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Perplexity Provider
pub struct PerplexityProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl PerplexityProvider {
    pub fn new(client: Client, endpoint: &EndpointConfig) -> Self {
        Self {
            client,
            base_url: endpoint.base_url.clone(),
            model: endpoint.model.clone(),
        }
    }
}

#[async_trait]
impl Provider for PerplexityProvider {
    fn id(&self) -> ModelId {
        ModelId::Perplexity
    }

    async fn call(&self, prompt: &str, api_key: &str) -> Result<String, VendorError> {
        debug!("Sending Perplexity chat completion request with model {}", self.model);

        let request = self.client
            .post(endpoint_url(&self.base_url, "chat/completions"))
            .bearer_auth(api_key)
            .json(&ChatCompletionRequest::user_prompt(&self.model, prompt));

        let response: ChatCompletionResponse = send_json(request)
            .await
            .map_err(|cause| VendorError::new(self.id(), cause))?;

        response.into_text().ok_or_else(|| {
            VendorError::new(
                self.id(),
                VendorFailure::MalformedResponse("missing choices[0].message.content".to_string()),
            )
        })
    }
}
