//! Extract stage: structural extraction memoised by markup content.

use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::{cache_aside, CacheStore};
use crate::error::Result;
use crate::extract::extract_events;
use crate::traits::EventExtractor;
use crate::types::ExtractionResult;

/// Stage name and cache-key prefix.
const STAGE_NAME: &str = "extractfamilyevents";

/// Wraps the structural extractor behind the cache-aside wrapper,
/// keyed on the raw markup bytes.
pub struct ExtractStage {
    cache: Arc<dyn CacheStore>,
}

impl ExtractStage {
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl EventExtractor for ExtractStage {
    async fn extract(&self, html: &str) -> Result<ExtractionResult> {
        cache_aside(self.cache.as_ref(), STAGE_NAME, html.as_bytes(), || async {
            extract_events(html)
        })
        .await
    }
}
