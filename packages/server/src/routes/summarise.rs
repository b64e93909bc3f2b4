//! Summarise service: generate a digest from markdown content.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use pipeline::{PipelineError, SummarizeStage, SummaryResult, DEFAULT_CHARACTER_LIMIT};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::problem::ApiError;
use crate::routes::health::health_handler;

#[derive(Clone)]
pub struct SummariseState {
    pub stage: Arc<SummarizeStage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummariseRequest {
    pub markdown: String,
    pub character_limit: u32,
}

impl Default for SummariseRequest {
    fn default() -> Self {
        Self {
            markdown: String::new(),
            character_limit: DEFAULT_CHARACTER_LIMIT,
        }
    }
}

/// `POST /process` — summarise the provided markdown with the model.
pub async fn summarise_handler(
    State(state): State<SummariseState>,
    Json(request): Json<SummariseRequest>,
) -> Result<Json<SummaryResult>, ApiError> {
    if request.markdown.trim().is_empty() {
        return Err(PipelineError::InvalidInput(
            "markdown parameter is required and cannot be empty".to_string(),
        )
        .into());
    }

    let result = state
        .stage
        .summarize_markdown(&request.markdown, request.character_limit)
        .await?;
    Ok(Json(result))
}

pub fn router(stage: Arc<SummarizeStage>) -> Router {
    Router::new()
        .route("/process", post(summarise_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(SummariseState { stage })
}
