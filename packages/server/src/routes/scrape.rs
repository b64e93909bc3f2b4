//! Scrape service: fetch a web page.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use pipeline::{FetchResult, PageFetcher};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::problem::ApiError;
use crate::routes::health::health_handler;

#[derive(Clone)]
pub struct ScrapeState {
    pub fetcher: Arc<dyn PageFetcher>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScrapeRequest {
    pub url: String,
}

/// `POST /process` — fetch HTML content from the provided URL.
pub async fn scrape_handler(
    State(state): State<ScrapeState>,
    Json(request): Json<ScrapeRequest>,
) -> Result<Json<FetchResult>, ApiError> {
    let result = state.fetcher.fetch(&request.url).await?;
    Ok(Json(result))
}

pub fn router(fetcher: Arc<dyn PageFetcher>) -> Router {
    Router::new()
        .route("/process", post(scrape_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(ScrapeState { fetcher })
}
