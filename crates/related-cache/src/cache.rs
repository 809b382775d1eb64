//! TTL cache of ranking results.
//!
//! Entries are keyed by `(document id, max results)` inside a [`CacheScope`] and stored as
//! JSON text in a [`SessionStore`]. An entry younger than the TTL is returned without recomputing. The cache
//! is best-effort: store failures are logged and the computed result is returned anyway, and
//! an unreadable entry is removed and recomputed.

use std::{fmt, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use related_rank::ScoredCandidate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{CacheScope, Clock, NullStore, SessionStore, StoreError, SystemClock};

/// Prefix of every storage key written by the ranking cache.
const KEY_PREFIX: &str = "related";

/// Identifies one cached ranking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Id of the target document.
    pub document_id: String,
    /// Number of results requested.
    pub max_results: usize,
    /// Collection and settings the ranking was computed for.
    pub scope: CacheScope,
}

impl CacheKey {
    /// Creates an unscoped key.
    pub fn new(document_id: impl Into<String>, max_results: usize) -> Self {
        Self {
            document_id: document_id.into(),
            max_results,
            scope: CacheScope::UNSCOPED,
        }
    }

    /// The same key filed under `scope`.
    pub fn in_scope(self, scope: CacheScope) -> Self {
        Self { scope, ..self }
    }

    /// The string key used in the store.
    pub fn storage_key(&self) -> String {
        format!(
            "{KEY_PREFIX}:{}:{}:{}",
            self.scope, self.document_id, self.max_results
        )
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.storage_key())
    }
}

/// A stored ranking with its creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    /// Creation time as Unix milliseconds.
    created_at: i64,
    /// The ranking.
    results: Vec<ScoredCandidate>,
}

impl CacheEntry {
    /// Returns true if the entry is younger than `ttl` at `now`.
    ///
    /// An entry stamped in the future is stale: its age cannot be trusted.
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age = now.timestamp_millis().saturating_sub(self.created_at);
        age >= 0 && i128::from(age) < i128::try_from(ttl.as_millis()).unwrap_or(i128::MAX)
    }
}

/// Session-scoped cache of ranking results.
#[derive(Clone)]
pub struct RankingCache {
    /// Backing store.
    store: Arc<dyn SessionStore>,
    /// Time source for entry timestamps.
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for RankingCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankingCache").finish_non_exhaustive()
    }
}

impl Default for RankingCache {
    fn default() -> Self {
        Self::disabled()
    }
}

impl RankingCache {
    /// Creates a cache over `store` using the system clock.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Creates a cache over `store` using `clock`.
    pub fn with_clock(store: Arc<dyn SessionStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// A cache that stores nothing, so every lookup recomputes.
    pub fn disabled() -> Self {
        Self::new(Arc::new(NullStore))
    }

    /// The current time according to the cache's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns the cached ranking for `key` if fresh, otherwise computes, stores and returns it.
    ///
    /// `compute` runs at most once. Failures of the store never reach the caller.
    pub fn get_or_compute<F>(
        &self,
        key: &CacheKey,
        ttl: Duration,
        compute: F,
    ) -> Vec<ScoredCandidate>
    where
        F: FnOnce() -> Vec<ScoredCandidate>,
    {
        let now = self.clock.now();
        if let Some(results) = self.lookup(key, now, ttl) {
            debug!(%key, "cache hit");
            return results;
        }

        debug!(%key, "cache miss");
        let results = compute();
        if let Err(e) = self.store(key, &results, now) {
            warn!(%key, error = %e, "failed to store ranking in cache");
        }
        results
    }

    /// Drops the entry for `key`, if any.
    pub fn invalidate(&self, key: &CacheKey) {
        if let Err(e) = self.store.remove(&key.storage_key()) {
            warn!(%key, error = %e, "failed to remove cache entry");
        }
    }

    /// Reads a fresh entry. Unreadable entries are removed.
    fn lookup(
        &self,
        key: &CacheKey,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<Vec<ScoredCandidate>> {
        let storage_key = key.storage_key();
        let raw = match self.store.get(&storage_key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(%key, error = %e, "failed to read cache entry");
                return None;
            }
        };

        match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) if entry.is_fresh(now, ttl) => Some(entry.results),
            Ok(_) => {
                debug!(%key, "cache entry expired");
                None
            }
            Err(e) => {
                warn!(%key, error = %e, "discarding unreadable cache entry");
                self.invalidate(key);
                None
            }
        }
    }

    /// Serializes and writes an entry.
    fn store(
        &self,
        key: &CacheKey,
        results: &[ScoredCandidate],
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let entry = CacheEntry {
            created_at: now.timestamp_millis(),
            results: results.to_vec(),
        };
        let json = serde_json::to_string(&entry).map_err(StoreError::Serialize)?;
        self.store.set(&key.storage_key(), &json)
    }
}
