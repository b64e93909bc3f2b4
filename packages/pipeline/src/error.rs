//! Typed errors for the pipeline library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can
//! map each kind to an HTTP status at the service boundary.

use thiserror::Error;

/// Errors that can occur during pipeline operations.
///
/// Cache-layer failures are deliberately absent: they never surface to
/// callers and degrade silently to recompute (see [`crate::cache`]).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed or missing request field or URL (HTTP 400)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Markup lacks the expected container or detail nodes (HTTP 404)
    #[error("structure not found: {0}")]
    StructureNotFound(String),

    /// Upstream site blocked the fetch, likely bot detection (HTTP 403)
    #[error("access forbidden: {0}")]
    AccessForbidden(String),

    /// Network or HTTP failure other than forbidden (HTTP 500)
    #[error("transport error: {0}")]
    Transport(String),

    /// A downstream stage returned no usable result (HTTP 500)
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Required setting absent at startup (HTTP 500)
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
