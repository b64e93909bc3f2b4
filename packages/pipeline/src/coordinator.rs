//! Pipeline coordinator: sequences scrape, extract, and summarise and
//! decides when a partial failure is fatal to the whole request.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{PipelineError, Result};
use crate::stages::DEFAULT_CHARACTER_LIMIT;
use crate::traits::{EventExtractor, PageFetcher, Summarizer};
use crate::types::PipelineResult;

/// Sequences the three stages, short-circuiting on the first missing
/// or invalid intermediate result.
///
/// The coordinator never inspects a stage's specific error kind, only
/// whether the expected payload is present; every stage failure
/// collapses into an [`PipelineError::Upstream`] naming the stage that
/// produced nothing.
pub struct Pipeline {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn EventExtractor>,
    summarizer: Arc<dyn Summarizer>,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn EventExtractor>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            summarizer,
        }
    }

    /// Run the end-to-end pipeline for one target URL.
    pub async fn process(&self, target_url: &str) -> Result<PipelineResult> {
        let fetched = match self.fetcher.fetch(target_url).await {
            Ok(fetched) if !fetched.html.is_empty() => fetched,
            Ok(_) => {
                return Err(PipelineError::Upstream(
                    "no html content received from scrape stage".to_string(),
                ))
            }
            Err(e) => {
                warn!(url = %target_url, error = %e, "scrape stage produced no result");
                return Err(PipelineError::Upstream(
                    "no html content received from scrape stage".to_string(),
                ));
            }
        };

        let extracted = match self.extractor.extract(&fetched.html).await {
            // An empty event list from a successful structural match is
            // valid; only a failed extraction is fatal.
            Ok(extracted) => extracted,
            Err(e) => {
                warn!(url = %target_url, error = %e, "extract stage produced no result");
                return Err(PipelineError::Upstream(
                    "no events received from extract stage".to_string(),
                ));
            }
        };

        let summary = match self
            .summarizer
            .summarize(&extracted.events, DEFAULT_CHARACTER_LIMIT)
            .await
        {
            Ok(result) if !result.summary.is_empty() => result.summary,
            Ok(_) => {
                return Err(PipelineError::Upstream(
                    "no summary received from summarise stage".to_string(),
                ))
            }
            Err(e) => {
                warn!(url = %target_url, error = %e, "summarise stage produced no result");
                return Err(PipelineError::Upstream(
                    "no summary received from summarise stage".to_string(),
                ));
            }
        };

        info!(
            url = %target_url,
            events = extracted.events.len(),
            "pipeline completed"
        );

        Ok(PipelineResult {
            target_url: target_url.to_string(),
            summary,
            family_events: extracted.events,
        })
    }
}
