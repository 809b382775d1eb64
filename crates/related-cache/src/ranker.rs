//! Ranker with a session cache in front.

use std::{sync::Arc, time::Duration};

use related_config::CacheSettings;
use related_document::Document;
use related_rank::{Ranker, ScoredCandidate};
use tracing::warn;

use crate::{CacheKey, CacheScope, FileStore, RankingCache, SessionStore, default_cache_dir};

/// Default time an entry stays fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// A [`Ranker`] whose results are memoized per `(document id, max results)` within a
/// [`CacheScope`].
#[derive(Debug, Clone)]
pub struct CachedRanker {
    /// The underlying ranker.
    ranker: Ranker,
    /// Result cache.
    cache: RankingCache,
    /// How long entries stay fresh.
    ttl: Duration,
    /// Namespace of this ranker's entries.
    scope: CacheScope,
}

impl CachedRanker {
    /// Wraps `ranker` with `cache`, filing entries under `scope`.
    pub fn new(ranker: Ranker, cache: RankingCache, ttl: Duration, scope: CacheScope) -> Self {
        Self {
            ranker,
            cache,
            ttl,
            scope,
        }
    }

    /// Wraps `ranker` with the cache described by `settings`.
    ///
    /// A disabled cache, or one whose directory cannot be determined, degrades to
    /// recomputing every time.
    pub fn from_settings(ranker: Ranker, settings: &CacheSettings, scope: CacheScope) -> Self {
        let ttl = Duration::from_secs(settings.ttl_seconds);
        Self::new(ranker, cache_from_settings(settings), ttl, scope)
    }

    /// The underlying ranker.
    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    /// Returns the documents related to `target`, from the cache when fresh.
    pub fn related(&self, target: &Document, candidates: &[Document]) -> Vec<ScoredCandidate> {
        let key = CacheKey::new(target.id.clone(), self.ranker.policy().max_results)
            .in_scope(self.scope);
        self.cache.get_or_compute(&key, self.ttl, || {
            self.ranker.rank_at(target, candidates, self.cache.now())
        })
    }
}

/// Builds the cache described by `settings`.
pub fn cache_from_settings(settings: &CacheSettings) -> RankingCache {
    if !settings.enabled {
        return RankingCache::disabled();
    }

    let dir = match &settings.dir {
        Some(dir) => dir.clone(),
        None => match default_cache_dir() {
            Ok(dir) => dir,
            Err(e) => {
                warn!(error = %e, "ranking cache disabled");
                return RankingCache::disabled();
            }
        },
    };
    let store: Arc<dyn SessionStore> = Arc::new(FileStore::new(dir));
    RankingCache::new(store)
}
