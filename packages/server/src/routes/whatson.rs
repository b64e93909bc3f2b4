//! What's-on service: the end-to-end pipeline behind one GET.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use pipeline::{Pipeline, PipelineResult};
use tower_http::trace::TraceLayer;

use crate::problem::ApiError;
use crate::routes::health::health_handler;

#[derive(Clone)]
pub struct WhatsOnState {
    pub pipeline: Arc<Pipeline>,
    /// The page to digest; fixed per deployment, not per request.
    pub target_url: Arc<str>,
}

/// `GET /process` — scrape, extract, and summarise the configured
/// target page.
pub async fn whatson_handler(
    State(state): State<WhatsOnState>,
) -> Result<Json<PipelineResult>, ApiError> {
    let result = state.pipeline.process(&state.target_url).await?;
    Ok(Json(result))
}

pub fn router(pipeline: Arc<Pipeline>, target_url: impl Into<Arc<str>>) -> Router {
    Router::new()
        .route("/process", get(whatson_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(WhatsOnState {
            pipeline,
            target_url: target_url.into(),
        })
}
