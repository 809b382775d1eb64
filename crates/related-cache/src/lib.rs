//! Session-scoped caching of related-article rankings.
//!
//! Ranking a post against the whole blog is cheap but not free, and the answer only changes
//! when posts change. [`RankingCache`] memoizes results per `(document id, max results)` for
//! a TTL window (one hour by default) in a pluggable [`SessionStore`]. Keys live inside a
//! [`CacheScope`] naming the collection and settings, so one store can serve several blogs:
//!
//! - [`MemoryStore`] for in-process caching with a byte quota
//! - [`FileStore`] for caching across CLI invocations
//! - [`NullStore`] when caching is disabled
//!
//! The cache is best-effort. A failing store never turns into an error for the caller; the
//! freshly computed ranking is returned and the failure is logged.

#![warn(missing_docs)]

mod cache;
mod clock;
mod error;
mod ranker;
mod scope;
mod store;

pub use cache::{CacheKey, RankingCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::StoreError;
pub use ranker::{CachedRanker, DEFAULT_TTL, cache_from_settings};
pub use scope::CacheScope;
pub use store::{DEFAULT_QUOTA, FileStore, MemoryStore, NullStore, SessionStore, default_cache_dir};
