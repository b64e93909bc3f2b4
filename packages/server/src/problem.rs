//! Problem responses: the one place pipeline errors become HTTP.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pipeline::PipelineError;
use serde::Serialize;

/// Problem payload returned for every failed request.
#[derive(Debug, Serialize)]
pub struct Problem {
    pub title: String,
    pub status: u16,
    pub detail: String,
}

/// Wrapper giving [`PipelineError`] an HTTP representation.
///
/// Handlers return `Result<Json<T>, ApiError>` and let `?` convert.
#[derive(Debug)]
pub struct ApiError(pub PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_and_title(&self) -> (StatusCode, &'static str) {
        match self.0 {
            PipelineError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
            PipelineError::StructureNotFound(_) => (StatusCode::NOT_FOUND, "Structure not found"),
            PipelineError::AccessForbidden(_) => (StatusCode::FORBIDDEN, "Access forbidden"),
            PipelineError::Transport(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Transport failure")
            }
            PipelineError::Upstream(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Upstream stage failed")
            }
            PipelineError::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, title) = self.status_and_title();
        tracing::warn!(status = %status, error = %self.0, "request failed");

        let problem = Problem {
            title: title.to_string(),
            status: status.as_u16(),
            detail: self.0.to_string(),
        };

        (status, Json(problem)).into_response()
    }
}
