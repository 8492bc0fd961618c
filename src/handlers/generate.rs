//! Generation handler
//!
//! POST /generate forwards a prompt to the selected provider

use crate::handlers::AppState;
use crate::models::{GenerateRequest, GenerationResult};
use crate::services::estimate_cost;
use crate::utils::error::{AppError, AppResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Handle generation requests
///
/// POST /generate
///
/// The model is validated before the key lookup so unknown models never reach a provider.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<Json<GenerationResult>> {
    let Json(request) = payload?;
    debug!("Received generate request for model: {}", request.model);

    let model = state.model_router.resolve(&request.model)?;

    let api_key = state
        .key_store
        .api_key(model)
        .await
        .ok_or(AppError::MissingApiKey(model))?;

    match state.model_router.route(model, &request.prompt, &api_key).await {
        Ok(result) => {
            info!(
                "Generated response from {} (estimated cost ${:.6})",
                model, result.estimated_cost_usd
            );
            Ok(Json(result))
        }
        Err(AppError::VendorCall(e)) => {
            if let Some(status) = e.upstream_status() {
                warn!("{} rejected the request with HTTP {}", model.display_name(), status);
            }

            if !state.settings.compat.legacy_vendor_errors {
                return Err(e.into());
            }

            warn!("{} (reported as a normal response)", e);
            Ok(Json(GenerationResult {
                response_text: e.to_string(),
                estimated_cost_usd: estimate_cost(model, &request.prompt),
            }))
        }
        Err(e) => Err(e),
    }
}
