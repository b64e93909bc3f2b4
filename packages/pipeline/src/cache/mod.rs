//! Cache-aside wrapper shared by every pipeline stage.
//!
//! Keys are content-addressed: `stage + ":" + base64(sha256(input))`
//! over the raw input bytes, so identical inputs always map to the
//! same entry and two inputs differing only in whitespace do not.
//! Entries live for a fixed 30 minutes from write with no
//! refresh-on-read.
//!
//! The wrapper is availability-favoring: a cache read error (or a
//! corrupt entry) is treated as a miss and a cache write error is
//! logged and swallowed, so cache unavailability degrades to
//! always-recompute rather than failing requests.

mod memory;
mod redis;

pub use memory::MemoryCacheStore;
pub use redis::RedisCacheStore;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::Result;

/// Fixed absolute expiry for every cache entry.
pub const CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Errors raised by cache store backends.
///
/// These never reach callers of the pipeline: the cache-aside wrapper
/// downgrades them to a miss (reads) or a warning (writes).
#[derive(Debug, Error)]
pub enum CacheError {
    /// Redis command or connection failure
    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    /// Any other backend failure
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// External cache store consumed by the cache-aside wrapper.
///
/// Entries are opaque bytes; only atomic get / set-with-expiry is
/// required. No multi-key transactions, no locking.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up an entry, returning `None` on a miss.
    async fn get(&self, key: &str) -> std::result::Result<Option<Vec<u8>>, CacheError>;

    /// Store an entry with an absolute time-to-live.
    async fn set(
        &self,
        key: &str,
        value: &[u8],
        ttl: Duration,
    ) -> std::result::Result<(), CacheError>;
}

/// Derive the cache key for a stage from its raw input bytes.
pub fn cache_key(stage: &str, input: &[u8]) -> String {
    let hash = Sha256::digest(input);
    format!("{}:{}", stage, BASE64.encode(hash))
}

/// Return the cached value for `input`, or compute and store it.
///
/// `compute` is never invoked on a hit. On a miss the computed value
/// is written back with [`CACHE_TTL`]; compute failures are returned
/// as-is and never memoised. One cache read per call, at most one
/// cache write.
pub async fn cache_aside<T, F, Fut>(
    store: &dyn CacheStore,
    stage: &str,
    input: &[u8],
    compute: F,
) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let key = cache_key(stage, input);

    match store.get(&key).await {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(value) => {
                debug!(stage = %stage, key = %key, "cache hit");
                return Ok(value);
            }
            Err(e) => {
                warn!(stage = %stage, key = %key, error = %e, "corrupt cache entry, recomputing");
            }
        },
        Ok(None) => {
            debug!(stage = %stage, key = %key, "cache miss");
        }
        Err(e) => {
            warn!(stage = %stage, key = %key, error = %e, "cache read failed, treating as miss");
        }
    }

    let value = compute().await?;

    match serde_json::to_vec(&value) {
        Ok(bytes) => {
            if let Err(e) = store.set(&key, &bytes, CACHE_TTL).await {
                warn!(stage = %stage, key = %key, error = %e, "cache write failed, result not memoised");
            }
        }
        Err(e) => {
            warn!(stage = %stage, key = %key, error = %e, "failed to serialize value for cache");
        }
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::testing::UnreachableCacheStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn cache_key_is_deterministic() {
        assert_eq!(cache_key("scrape", b"input"), cache_key("scrape", b"input"));
        assert_ne!(cache_key("scrape", b"input"), cache_key("scrape", b"other"));
    }

    #[test]
    fn cache_key_is_prefixed_with_stage() {
        let key = cache_key("extractfamilyevents", b"<html></html>");
        assert!(key.starts_with("extractfamilyevents:"));
        // Same input under a different stage name is a different entry.
        assert_ne!(key, cache_key("scrape", b"<html></html>"));
    }

    #[test]
    fn cache_key_hashes_raw_bytes_verbatim() {
        // No canonicalisation: a whitespace difference is a new entry.
        assert_ne!(cache_key("scrape", b"a b"), cache_key("scrape", b"a  b"));
    }

    #[tokio::test]
    async fn second_call_skips_compute() {
        let store = MemoryCacheStore::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let value: String = cache_aside(&store, "scrape", b"https://example.com", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("computed".to_string())
            })
            .await
            .unwrap();
            assert_eq!(value, "computed");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_are_never_memoised() {
        let store = MemoryCacheStore::new();
        let calls = AtomicUsize::new(0);

        let first: Result<String> = cache_aside(&store, "scrape", b"url", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(PipelineError::Transport("boom".into()))
        })
        .await;
        assert!(first.is_err());

        // The failure was not written back, so the next call recomputes.
        let second: String = cache_aside(&store, "scrape", b"url", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok("recovered".to_string())
        })
        .await
        .unwrap();

        assert_eq!(second, "recovered");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unreachable_store_degrades_to_recompute() {
        let store = UnreachableCacheStore;
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let value: String = cache_aside(&store, "summarise", b"# Events", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("digest".to_string())
            })
            .await
            .unwrap();
            assert_eq!(value, "digest");
        }

        // Every call recomputes, but none of them fail.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn corrupt_entry_is_treated_as_miss() {
        let store = MemoryCacheStore::new();
        let key = cache_key("scrape", b"url");
        store.set(&key, b"not json", CACHE_TTL).await.unwrap();

        let value: String = cache_aside(&store, "scrape", b"url", || async {
            Ok("fresh".to_string())
        })
        .await
        .unwrap();

        assert_eq!(value, "fresh");
    }
}
