//! Cacheable stage clients.
//!
//! Each client wraps exactly one unit of work behind the cache-aside
//! wrapper: scrape performs network I/O, extract invokes the
//! structural extractor, summarise invokes a language-model
//! completion. Stage names double as cache-key prefixes, so no stage
//! ever reads another stage's entries.

mod extract;
mod scrape;
mod summarize;

pub use extract::ExtractStage;
pub use scrape::ScrapeStage;
pub use summarize::{SummarizeStage, DEFAULT_CHARACTER_LIMIT};
