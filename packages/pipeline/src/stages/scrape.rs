//! Scrape stage: fetch raw markup for a URL with a browser-like
//! header set.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{self, HeaderMap};
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use crate::cache::{cache_aside, CacheStore};
use crate::error::{PipelineError, Result};
use crate::traits::PageFetcher;
use crate::types::FetchResult;

/// Stage name and cache-key prefix.
const STAGE_NAME: &str = "scrape";

/// Browser-identifying user agent; some event sites block obvious bots.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// Fetches a page over HTTP, memoising successful fetches by URL.
///
/// The response body is returned as-is; gzip/deflate/brotli bodies are
/// decompressed by the client. A 403 maps to
/// [`PipelineError::AccessForbidden`], every other non-success status
/// to [`PipelineError::Transport`].
pub struct ScrapeStage {
    client: reqwest::Client,
    cache: Arc<dyn CacheStore>,
}

impl ScrapeStage {
    /// Build the stage with its own HTTP client. `timeout` bounds the
    /// whole request; there is no retry.
    pub fn new(cache: Arc<dyn CacheStore>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8"
                .parse()
                .unwrap(),
        );
        headers.insert(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9".parse().unwrap());
        headers.insert(header::DNT, "1".parse().unwrap());
        headers.insert(header::CONNECTION, "keep-alive".parse().unwrap());
        headers.insert(
            header::UPGRADE_INSECURE_REQUESTS,
            "1".parse().unwrap(),
        );

        // Accept-Encoding is managed by reqwest so response bodies are
        // decompressed transparently.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| PipelineError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, cache })
    }

    /// Require an absolute http(s) URL.
    fn validate_url(url: &str) -> Result<Url> {
        let parsed = Url::parse(url).map_err(|_| {
            PipelineError::InvalidInput(format!(
                "invalid URL provided: '{url}'; provide a valid HTTP or HTTPS URL"
            ))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(PipelineError::InvalidInput(format!(
                "invalid URL scheme '{}'; provide a valid HTTP or HTTPS URL",
                parsed.scheme()
            )));
        }

        Ok(parsed)
    }

    async fn fetch_page(&self, url: &Url) -> Result<FetchResult> {
        debug!(url = %url, "fetching page");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "scrape request failed");
            PipelineError::Transport(format!("failed to fetch content from {url}: {e}"))
        })?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(PipelineError::AccessForbidden(format!(
                "access forbidden (403) for {url}; the website may be blocking automated requests"
            )));
        }
        if !status.is_success() {
            return Err(PipelineError::Transport(format!("HTTP {status} for {url}")));
        }

        let html = response
            .text()
            .await
            .map_err(|e| PipelineError::Transport(format!("failed to read body from {url}: {e}")))?;

        Ok(FetchResult {
            url: url.to_string(),
            html,
            scraped_at: Utc::now(),
        })
    }
}

#[async_trait]
impl PageFetcher for ScrapeStage {
    async fn fetch(&self, url: &str) -> Result<FetchResult> {
        // Validation failures are never cached and never retried.
        let target = Self::validate_url(url)?;

        cache_aside(self.cache.as_ref(), STAGE_NAME, url.as_bytes(), || async {
            self.fetch_page(&target).await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_http_and_https_urls() {
        assert!(ScrapeStage::validate_url("https://example.com").is_ok());
        assert!(ScrapeStage::validate_url("http://example.com/events?page=2").is_ok());
    }

    #[test]
    fn rejects_non_http_schemes() {
        let err = ScrapeStage::validate_url("ftp://example.com").unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
    }

    #[test]
    fn rejects_relative_and_garbage_input() {
        assert!(matches!(
            ScrapeStage::validate_url("not a url"),
            Err(PipelineError::InvalidInput(_))
        ));
        assert!(matches!(
            ScrapeStage::validate_url("/events"),
            Err(PipelineError::InvalidInput(_))
        ));
    }
}
