//! Gemini Provider implementation
//!
//! generateContent API authenticated with the x-goog-api-key header

use super::{endpoint_url, send_json, Provider, VendorError, VendorFailure};
use crate::config::EndpointConfig;
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::models::ModelId;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Gemini Provider
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(client: Client, endpoint: &EndpointConfig) -> Self {
        Self {
            client,
            base_url: endpoint.base_url.clone(),
            model: endpoint.model.clone(),
        }
    }

    fn build_url(&self) -> String {
        endpoint_url(&self.base_url, &format!("models/{}:generateContent", self.model))
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn id(&self) -> ModelId {
        ModelId::Gemini
    }

    async fn call(&self, prompt: &str, api_key: &str) -> Result<String, VendorError> {
        debug!("Sending Gemini generateContent request with model {}", self.model);

        let request = self.client
            .post(self.build_url())
            .header("x-goog-api-key", api_key)
            .json(&GenerateContentRequest::from_prompt(prompt));

        let response: GenerateContentResponse = send_json(request)
            .await
            .map_err(|cause| VendorError::new(self.id(), cause))?;

        response.into_text().ok_or_else(|| {
            VendorError::new(
                self.id(),
                VendorFailure::MalformedResponse("missing candidates[0].content.parts[0].text".to_string()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let provider = GeminiProvider::new(
            Client::new(),
            &EndpointConfig {
                base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                model: "gemini-pro".to_string(),
            },
        );

        assert_eq!(
            provider.build_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
        );
    }
}
