//! Gateway API models
//!
//! Request and response bodies of the HTTP endpoints and the closed set of supported models

use crate::utils::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported model identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelId {
    OpenAI,
    Gemini,
    Claude,
    Perplexity,
}

impl ModelId {
    /// Every supported model, in display order
    pub const ALL: [ModelId; 4] = [
        ModelId::OpenAI,
        ModelId::Gemini,
        ModelId::Claude,
        ModelId::Perplexity,
    ];

    /// Wire identifier used in requests
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::OpenAI => "openai",
            ModelId::Gemini => "gemini",
            ModelId::Claude => "claude",
            ModelId::Perplexity => "perplexity",
        }
    }

    /// Vendor name used in messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelId::OpenAI => "OpenAI",
            ModelId::Gemini => "Gemini",
            ModelId::Claude => "Claude",
            ModelId::Perplexity => "Perplexity",
        }
    }

    /// Configuration variable holding this provider's API key
    pub fn key_var(&self) -> &'static str {
        match self {
            ModelId::OpenAI => "OPENAI_API_KEY",
            ModelId::Gemini => "GEMINI_API_KEY",
            ModelId::Claude => "CLAUDE_API_KEY",
            ModelId::Perplexity => "PERPLEXITY_API_KEY",
        }
    }

    /// Estimated USD price per thousand tokens (zero when no pricing is defined)
    pub fn price_per_thousand_tokens(&self) -> f64 {
        match self {
            ModelId::OpenAI => 0.03,
            ModelId::Claude => 0.01,
            ModelId::Gemini | ModelId::Perplexity => 0.0,
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelId::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| AppError::InvalidModel(s.to_string()))
    }
}

/// POST /generate request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (openai, gemini, claude or perplexity)
    pub model: String,
    /// Prompt text, may be empty
    pub prompt: String,
}

/// Text returned by a provider together with its estimated cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(rename = "response")]
    pub response_text: String,
    /// Best-effort estimate in USD, not billed truth
    #[serde(rename = "cost")]
    pub estimated_cost_usd: f64,
}

/// API keys per provider; every field is optional so updates can be partial
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyBundle {
    #[serde(default, alias = "openai_api_key")]
    pub openai_key: Option<String>,
    #[serde(default, alias = "gemini_api_key")]
    pub gemini_key: Option<String>,
    #[serde(default, alias = "claude_api_key")]
    pub claude_key: Option<String>,
    #[serde(default, alias = "perplexity_api_key")]
    pub perplexity_key: Option<String>,
}

impl ApiKeyBundle {
    pub fn get(&self, model: ModelId) -> Option<&str> {
        self.slot(model).as_deref()
    }

    pub fn set(&mut self, model: ModelId, key: impl Into<String>) {
        *self.slot_mut(model) = Some(key.into());
    }

    /// Present keys, skipping empty strings
    pub fn entries(&self) -> impl Iterator<Item = (ModelId, &str)> + '_ {
        ModelId::ALL
            .into_iter()
            .filter_map(move |model| self.get(model).filter(|k| !k.is_empty()).map(|k| (model, k)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    fn slot(&self, model: ModelId) -> &Option<String> {
        match model {
            ModelId::OpenAI => &self.openai_key,
            ModelId::Gemini => &self.gemini_key,
            ModelId::Claude => &self.claude_key,
            ModelId::Perplexity => &self.perplexity_key,
        }
    }

    fn slot_mut(&mut self, model: ModelId) -> &mut Option<String> {
        match model {
            ModelId::OpenAI => &mut self.openai_key,
            ModelId::Gemini => &mut self.gemini_key,
            ModelId::Claude => &mut self.claude_key,
            ModelId::Perplexity => &mut self.perplexity_key,
        }
    }
}

// Key material never reaches the logs
impl fmt::Debug for ApiKeyBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = |model: ModelId| if self.get(model).map_or(false, |k| !k.is_empty()) { "set" } else { "unset" };
        f.debug_struct("ApiKeyBundle")
            .field("openai_key", &state(ModelId::OpenAI))
            .field("gemini_key", &state(ModelId::Gemini))
            .field("claude_key", &state(ModelId::Claude))
            .field("perplexity_key", &state(ModelId::Perplexity))
            .finish()
    }
}

/// POST /upload response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub text: String,
}

/// Generic `{message}` response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Chat message accepted by /chat/send and listed by /chat/history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub content: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub model: Option<String>,
}

fn default_role() -> String {
    "user".to_string()
}

/// /chat/send response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_id_parsing() {
        for model in ModelId::ALL {
            assert_eq!(model.as_str().parse::<ModelId>().unwrap(), model);
        }

        assert!(matches!("mistral".parse::<ModelId>(), Err(AppError::InvalidModel(m)) if m == "mistral"));
        assert!("OpenAI".parse::<ModelId>().is_err());
        assert!("".parse::<ModelId>().is_err());
    }

    #[test]
    fn test_model_id_serde() {
        assert_eq!(serde_json::to_string(&ModelId::OpenAI).unwrap(), "\"openai\"");
        let model: ModelId = serde_json::from_str("\"perplexity\"").unwrap();
        assert_eq!(model, ModelId::Perplexity);
    }

    #[test]
    fn test_key_vars() {
        assert_eq!(ModelId::OpenAI.key_var(), "OPENAI_API_KEY");
        assert_eq!(ModelId::Perplexity.key_var(), "PERPLEXITY_API_KEY");
    }

    #[test]
    fn test_bundle_aliases_and_entries() {
        let bundle: ApiKeyBundle = serde_json::from_str(
            r#"{"openai_api_key": "sk-1", "claude_key": "sk-ant-2", "gemini_key": ""}"#,
        ).unwrap();

        let entries: Vec<_> = bundle.entries().collect();
        assert_eq!(entries, vec![(ModelId::OpenAI, "sk-1"), (ModelId::Claude, "sk-ant-2")]);
        assert!(!bundle.is_empty());
        assert!(ApiKeyBundle::default().is_empty());
    }

    #[test]
    fn test_bundle_debug_redacts_keys() {
        let mut bundle = ApiKeyBundle::default();
        bundle.set(ModelId::Claude, "sk-ant-secret");

        let debug = format!("{:?}", bundle);
        assert!(!debug.contains("sk-ant-secret"));
        assert!(debug.contains("claude_key: \"set\""));
    }

    #[test]
    fn test_generation_result_wire_names() {
        let result = GenerationResult { response_text: "hi".to_string(), estimated_cost_usd: 0.0 };
        assert_eq!(serde_json::to_value(&result).unwrap(), serde_json::json!({"response": "hi", "cost": 0.0}));
    }

    #[test]
    fn test_chat_message_defaults() {
        let message: ChatMessage = serde_json::from_str(r#"{"content": "hello"}"#).unwrap();
        assert_eq!(message.role, "user");
        assert!(message.model.is_none());
    }
}
