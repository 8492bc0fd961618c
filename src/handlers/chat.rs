//! Chat handlers
//!
//! Placeholder endpoints: messages are echoed and no history is kept

use crate::models::{ChatMessage, ChatReply};
use crate::utils::error::AppResult;
use axum::{extract::rejection::JsonRejection, Json};
use tracing::debug;

/// POST /chat/send
pub async fn send_message(payload: Result<Json<ChatMessage>, JsonRejection>) -> AppResult<Json<ChatReply>> {
    let Json(message) = payload?;
    debug!("Echoing {} chat message", message.role);

    Ok(Json(ChatReply {
        message: format!("Echo: {}", message.content),
        model: message.model.unwrap_or_else(|| "default".to_string()),
    }))
}

/// GET /chat/history
pub async fn chat_history() -> Json<Vec<ChatMessage>> {
    Json(Vec::new())
}
