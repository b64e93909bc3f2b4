//! Extract service: structured events from markup that follows the
//! fixed layout.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use pipeline::{EventExtractor, ExtractionResult};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::problem::ApiError;
use crate::routes::health::health_handler;

#[derive(Clone)]
pub struct ExtractState {
    pub extractor: Arc<dyn EventExtractor>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExtractRequest {
    pub html: String,
}

/// `POST /process` — extract events from HTML content.
pub async fn extract_handler(
    State(state): State<ExtractState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractionResult>, ApiError> {
    let result = state.extractor.extract(&request.html).await?;
    Ok(Json(result))
}

pub fn router(extractor: Arc<dyn EventExtractor>) -> Router {
    Router::new()
        .route("/process", post(extract_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(ExtractState { extractor })
}
