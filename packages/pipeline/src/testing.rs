//! Mock implementations for testing the pipeline without network,
//! model, or Redis access.
//!
//! Every mock records its calls so tests can assert that a stage was
//! (or was not) invoked.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::cache::{CacheError, CacheStore};
use crate::error::{PipelineError, Result};
use crate::traits::{ChatModel, EventExtractor, PageFetcher, Summarizer};
use crate::types::{ExtractionResult, FamilyEvent, FetchResult, SummaryResult};

/// Page fetcher returning a fixed HTML body.
#[derive(Default)]
pub struct MockFetcher {
    html: String,
    calls: AtomicUsize,
}

impl MockFetcher {
    pub fn returning(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FetchResult {
            url: url.to_string(),
            html: self.html.clone(),
            scraped_at: Utc::now(),
        })
    }
}

/// Event extractor returning a fixed event list, or always failing.
#[derive(Default)]
pub struct MockExtractor {
    events: Option<Vec<FamilyEvent>>,
    calls: AtomicUsize,
}

impl MockExtractor {
    pub fn returning(events: Vec<FamilyEvent>) -> Self {
        Self {
            events: Some(events),
            calls: AtomicUsize::new(0),
        }
    }

    /// Extractor that fails every call with `StructureNotFound`.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventExtractor for MockExtractor {
    async fn extract(&self, _html: &str) -> Result<ExtractionResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.events {
            Some(events) => Ok(ExtractionResult {
                events: events.clone(),
            }),
            None => Err(PipelineError::StructureNotFound(
                "mock extractor configured to fail".to_string(),
            )),
        }
    }
}

/// Summariser returning a fixed digest, or always failing.
#[derive(Default)]
pub struct MockSummarizer {
    summary: Option<String>,
    calls: AtomicUsize,
}

impl MockSummarizer {
    pub fn replying(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Summariser that fails every call with `Upstream`.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(
        &self,
        _events: &[FamilyEvent],
        _character_limit: u32,
    ) -> Result<SummaryResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.summary {
            Some(summary) => Ok(SummaryResult {
                summary: summary.clone(),
            }),
            None => Err(PipelineError::Upstream(
                "mock summariser configured to fail".to_string(),
            )),
        }
    }
}

/// Chat model returning a fixed completion and recording the prompts
/// it was given.
pub struct MockChatModel {
    reply: String,
    calls: RwLock<Vec<(String, String)>>,
}

impl MockChatModel {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: RwLock::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// The `(system_prompt, user_message)` pair of the most recent call.
    pub fn last_call(&self) -> Option<(String, String)> {
        self.calls.read().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete_chat(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        self.calls
            .write()
            .unwrap()
            .push((system_prompt.to_string(), user_message.to_string()));
        Ok(self.reply.clone())
    }
}

/// Cache store where every operation fails, for exercising the
/// availability-favoring degradation path.
pub struct UnreachableCacheStore;

#[async_trait]
impl CacheStore for UnreachableCacheStore {
    async fn get(&self, _key: &str) -> std::result::Result<Option<Vec<u8>>, CacheError> {
        Err(CacheError::Backend("cache unreachable".to_string()))
    }

    async fn set(
        &self,
        _key: &str,
        _value: &[u8],
        _ttl: Duration,
    ) -> std::result::Result<(), CacheError> {
        Err(CacheError::Backend("cache unreachable".to_string()))
    }
}
