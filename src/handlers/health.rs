//! Health check handlers
//!
//! Provides the welcome endpoint and application health status

use crate::config::Environment;
use crate::handlers::AppState;
use crate::models::{MessageResponse, ModelId};
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Details
    pub details: HealthDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDetails {
    /// Deployment environment
    pub environment: Environment,
    /// Providers that have an API key
    pub configured_providers: Vec<ModelId>,
    /// Whether /store-keys may write to disk
    pub key_writes_enabled: bool,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to AI Chat API".to_string(),
    })
}

/// Basic health check
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "AI Chat API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: HealthDetails {
            environment: state.settings.environment,
            configured_providers: state.key_store.configured().await,
            key_writes_enabled: !state.settings.is_production(),
            uptime_seconds: get_uptime_seconds(),
        },
    })
}

/// Get service uptime in seconds
///
/// The clock starts on the first call, which `build_router` makes at startup.
pub(crate) fn get_uptime_seconds() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START_TIME: OnceLock<Instant> = OnceLock::new();

    START_TIME.get_or_init(Instant::now).elapsed().as_secs()
}
