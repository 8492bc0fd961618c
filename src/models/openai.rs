//! OpenAI-compatible chat completion models
//!
//! Shared by the OpenAI and Perplexity adapters, which speak the same schema

use serde::{Deserialize, Serialize};

/// Chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model name
    pub model: String,
    /// Message list
    pub messages: Vec<ChatCompletionMessage>,
}

/// Single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionMessage {
    pub role: String,
    pub content: String,
}

/// Chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionReply,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionReply {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionRequest {
    /// Build a single-turn user request
    pub fn user_prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatCompletionMessage {
                role: "user".to_string(),
                content: prompt.into(),
            }],
        }
    }
}

impl ChatCompletionResponse {
    /// Text at `choices[0].message.content`
    pub fn into_text(self) -> Option<String> {
        self.choices.into_iter().next()?.message.content
    }
}
