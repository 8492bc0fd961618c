//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod chat;
pub mod generate;
pub mod health;
pub mod keys;
pub mod upload;

use crate::config::{SecurityConfig, Settings};
use crate::middleware::logging::request_logging_middleware;
use crate::services::{KeyStore, ModelRouter};
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Application state
pub struct AppState {
    pub settings: Settings,
    pub model_router: ModelRouter,
    pub key_store: KeyStore,
}

impl AppState {
    /// Build the state described by the settings
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let model_router = ModelRouter::new(&settings)?;

        let key_store = KeyStore::open(
            settings.key_store.path.clone(),
            settings.is_production(),
            settings.api_keys.clone(),
        )
        .context("Failed to open key store")?;

        Ok(Self {
            settings,
            model_router,
            key_store,
        })
    }
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    let state = AppState::from_settings(settings)?;
    Ok(build_router(Arc::new(state)))
}

/// Assemble routes and middleware around an existing state
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.settings.request.max_request_size;
    let cors = cors_layer(&state.settings.security);
    health::get_uptime_seconds();

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_logging_middleware));

    let router = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/generate", post(generate::generate))
        .route("/upload", post(upload::upload_file))
        .route("/store-keys", post(keys::store_keys))
        .route("/chat/send", post(chat::send_message))
        .route("/chat/history", get(chat::chat_history))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(middleware_stack);

    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// CORS policy from the security settings
///
/// A `*` origin allows anything without credentials; explicit origins allow credentials.
fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.cors_enabled {
        return None;
    }

    if security.allowed_origins.iter().any(|origin| origin == "*") {
        return Some(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let origins: Vec<HeaderValue> = security
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true),
    )
}
