//! Domain types shared across the pipeline stages.
//!
//! All values are immutable once constructed and serialize with the
//! camelCase names the deployed services use on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One event extracted from the source markup.
///
/// Fields default to empty strings when absent in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FamilyEvent {
    pub url: String,
    pub title: String,
    pub location: String,
    pub date_range: String,
}

/// Result of a successful page fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    pub url: String,
    pub html: String,
    pub scraped_at: DateTime<Utc>,
}

/// Ordered events extracted from one page (at most 5, document order).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub events: Vec<FamilyEvent>,
}

/// Plain-text digest of an event list.
///
/// The character limit is advisory: it is passed into the generation
/// prompt and not enforced after the fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub summary: String,
}

/// Final composite artifact produced by the pipeline coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub target_url: String,
    pub summary: String,
    pub family_events: Vec<FamilyEvent>,
}
