//! Anthropic Messages API models

use serde::{Deserialize, Serialize};

/// Messages API request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<ClaudeMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeMessage {
    pub role: String,
    pub content: String,
}

/// Messages API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ClaudeContentBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeContentBlock {
    #[serde(rename = "type", default)]
    pub block_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesRequest {
    pub fn user_prompt(model: impl Into<String>, max_tokens: u32, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: prompt.into(),
            }],
        }
    }
}

impl MessagesResponse {
    /// Text at `content[0].text`
    pub fn into_text(self) -> Option<String> {
        self.content.into_iter().next()?.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let value = serde_json::to_value(MessagesRequest::user_prompt("claude-3-opus-20240229", 1024, "hi")).unwrap();
        assert_eq!(value["model"], "claude-3-opus-20240229");
        assert_eq!(value["max_tokens"], 1024);
        assert_eq!(value["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_into_text() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"id":"msg_1","type":"message","role":"assistant","content":[{"type":"text","text":"Hello!"}],"stop_reason":"end_turn"}"#,
        ).unwrap();
        assert_eq!(response.into_text(), Some("Hello!".to_string()));
    }
}
