//! HTTP services for the family-events pipeline.
//!
//! Four deployable services share this library: `scrape-service`,
//! `extract-events-service`, and `summarise-service` each expose one
//! stage as `POST /process`; `whatson-service` exposes the end-to-end
//! pipeline as `GET /process`. Every service also serves `GET /health`.
//!
//! Handlers convert [`pipeline::PipelineError`] kinds into problem
//! responses at the boundary; no failure crashes the process.

pub mod config;
pub mod problem;
pub mod routes;

pub use config::Config;
pub use problem::{ApiError, Problem};
