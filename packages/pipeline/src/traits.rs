//! Trait seams between the coordinator, the stage clients, and the
//! language model.
//!
//! The coordinator depends only on these traits so that stages can be
//! replaced with test doubles; the concrete clients live in
//! [`crate::stages`].

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ExtractionResult, FamilyEvent, FetchResult, SummaryResult};

/// Fetches raw markup for a URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResult>;
}

/// Extracts structured events from raw markup.
#[async_trait]
pub trait EventExtractor: Send + Sync {
    async fn extract(&self, html: &str) -> Result<ExtractionResult>;
}

/// Produces a plain-text digest of an event list.
///
/// `character_limit` is advisory; it is folded into the generation
/// prompt rather than enforced on the output.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        events: &[FamilyEvent],
        character_limit: u32,
    ) -> Result<SummaryResult>;
}

/// Hosted language-model chat endpoint.
///
/// Returns the first content part of the model's single response.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete_chat(&self, system_prompt: &str, user_message: &str) -> Result<String>;
}
