//! Model Router
//!
//! Maps a model identifier to its provider adapter and pricing rule

use crate::config::Settings;
use crate::models::{GenerationResult, ModelId};
use crate::providers::{
    build_client, ClaudeProvider, GeminiProvider, OpenAIProvider, PerplexityProvider, Provider,
};
use crate::utils::error::AppResult;
use crate::utils::logging::prompt_preview;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Estimated token count: one token per four characters, rounded down
pub fn estimate_tokens(prompt: &str) -> u64 {
    (prompt.chars().count() / 4) as u64
}

/// Estimated USD cost of sending `prompt` to `model`
pub fn estimate_cost(model: ModelId, prompt: &str) -> f64 {
    estimate_tokens(prompt) as f64 * model.price_per_thousand_tokens() / 1000.0
}

/// One adapter per supported model
#[derive(Clone)]
pub struct ProviderTable {
    pub openai: Arc<dyn Provider>,
    pub gemini: Arc<dyn Provider>,
    pub claude: Arc<dyn Provider>,
    pub perplexity: Arc<dyn Provider>,
}

impl ProviderTable {
    /// Build the HTTP adapters described by the settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = build_client(settings.providers.timeout_duration())?;
        let providers = &settings.providers;

        Ok(Self {
            openai: Arc::new(OpenAIProvider::new(client.clone(), &providers.openai)),
            gemini: Arc::new(GeminiProvider::new(client.clone(), &providers.gemini)),
            claude: Arc::new(ClaudeProvider::new(
                client.clone(),
                &providers.claude,
                &providers.anthropic_version,
                providers.claude_max_tokens,
            )),
            perplexity: Arc::new(PerplexityProvider::new(client, &providers.perplexity)),
        })
    }

    /// Adapter serving `model`
    pub fn get(&self, model: ModelId) -> &Arc<dyn Provider> {
        match model {
            ModelId::OpenAI => &self.openai,
            ModelId::Gemini => &self.gemini,
            ModelId::Claude => &self.claude,
            ModelId::Perplexity => &self.perplexity,
        }
    }
}

/// Model Router
///
/// Holds the provider table and turns a prompt into a priced generation result
#[derive(Clone)]
pub struct ModelRouter {
    providers: ProviderTable,
}

impl ModelRouter {
    /// Create a router with HTTP adapters built from settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let providers = ProviderTable::from_settings(settings)?;
        info!("Model router initialized with {} providers", ModelId::ALL.len());
        Ok(Self { providers })
    }

    /// Create a router over an explicit provider table
    pub fn with_providers(providers: ProviderTable) -> Self {
        Self { providers }
    }

    /// Parse a model identifier, failing with `InvalidModel` for anything unsupported
    pub fn resolve(&self, model: &str) -> AppResult<ModelId> {
        model.parse()
    }

    /// Send `prompt` to the adapter for `model` and price the result
    pub async fn route(&self, model: ModelId, prompt: &str, api_key: &str) -> AppResult<GenerationResult> {
        let provider = self.providers.get(model);
        let estimated_cost_usd = estimate_cost(model, prompt);

        debug!(
            "Routing prompt to {} ({} estimated tokens): {}",
            model,
            estimate_tokens(prompt),
            prompt_preview(prompt)
        );

        let response_text = provider.call(prompt, api_key).await?;

        Ok(GenerationResult {
            response_text,
            estimated_cost_usd,
        })
    }
}
