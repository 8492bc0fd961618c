//! Key storage handler

use crate::handlers::AppState;
use crate::models::{ApiKeyBundle, MessageResponse};
use crate::utils::error::AppResult;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

/// Store provider API keys
///
/// POST /store-keys
///
/// Only the keys present in the body are written. Refused with 403 in production.
pub async fn store_keys(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ApiKeyBundle>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(bundle) = payload?;
    debug!("Received key update: {:?}", bundle);

    state.key_store.store_keys(&bundle).await?;

    Ok(Json(MessageResponse {
        message: "API keys stored successfully.".to_string(),
    }))
}
