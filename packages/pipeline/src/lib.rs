//! Cache-aside extraction/summarisation pipeline for family events.
//!
//! Fetches a web page, extracts a bounded list of structured event
//! records from its markup, and produces a short natural-language
//! digest of those records. Each stage is an independently cacheable
//! unit of work; the coordinator composes them into one end-to-end
//! pipeline.
//!
//! # Design
//!
//! - Every stage goes through the same [`cache::cache_aside`]
//!   discipline: content-addressed keys, fixed 30-minute expiry,
//!   failures never memoised, cache outages degrade to recompute.
//! - The structural extractor is a pure function over markup and
//!   tolerates malformed input.
//! - The coordinator only checks whether a stage produced a usable
//!   payload; it never inspects the stage's error kind.
//!
//! # Modules
//!
//! - [`cache`] - Cache-aside wrapper and cache store backends
//! - [`extract`] - Structural HTML extractor
//! - [`markdown`] - Event list rendering and markdown escaping
//! - [`stages`] - Cacheable stage clients (scrape, extract, summarise)
//! - [`coordinator`] - End-to-end pipeline sequencing
//! - [`testing`] - Mock implementations for tests

pub mod ai;
pub mod cache;
pub mod coordinator;
pub mod error;
pub mod extract;
pub mod markdown;
pub mod stages;
pub mod testing;
pub mod traits;
pub mod types;

pub use cache::{cache_aside, CacheError, CacheStore, MemoryCacheStore, RedisCacheStore};
pub use coordinator::Pipeline;
pub use error::{PipelineError, Result};
pub use extract::extract_events;
pub use markdown::{escape_markdown, events_to_markdown};
pub use stages::{ExtractStage, ScrapeStage, SummarizeStage, DEFAULT_CHARACTER_LIMIT};
pub use traits::{ChatModel, EventExtractor, PageFetcher, Summarizer};
pub use types::{ExtractionResult, FamilyEvent, FetchResult, PipelineResult, SummaryResult};
