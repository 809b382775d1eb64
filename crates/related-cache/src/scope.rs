//! Cache namespaces.
//!
//! A ranking only means something for the collection and settings it was computed with. Every
//! cached entry is therefore filed under a [`CacheScope`]: a hash of the posts location and of
//! every setting that changes vectors or scores. Two blogs that share a post id, or one blog
//! ranked under two configurations, never see each other's entries.

use std::{
    fmt,
    hash::{Hash, Hasher},
    path::Path,
};

use related_config::{ExtractSettings, RankSettings};
use siphasher::sip::SipHasher24;

/// Bumped when the stored entry format or the ranking formula changes.
const ENTRY_VERSION: u32 = 1;

/// Namespace for the entries of one collection under one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheScope(u64);

impl CacheScope {
    /// Scope used when the caller does not say which collection it ranks.
    pub const UNSCOPED: Self = Self(0);

    /// Scope for the posts at `posts` ranked with `rank` and `extract`.
    ///
    /// `posts` is canonicalized when it exists, so `./blog` and its absolute form share a
    /// scope.
    pub fn new(posts: &Path, rank: &RankSettings, extract: &ExtractSettings) -> Self {
        let posts = posts.canonicalize().unwrap_or_else(|_| posts.to_path_buf());

        let mut hasher = SipHasher24::new();
        ENTRY_VERSION.hash(&mut hasher);
        posts.hash(&mut hasher);

        rank.max_results.hash(&mut hasher);
        for value in [
            rank.min_similarity,
            rank.similarity_weight,
            rank.category_weight,
            rank.recency_weight,
            rank.category_boost,
            rank.recency_half_life_days,
        ] {
            value.to_bits().hash(&mut hasher);
        }

        extract.min_word_length.hash(&mut hasher);
        extract.max_word_length.hash(&mut hasher);
        extract.min_term_frequency.hash(&mut hasher);
        let mut stopwords: Vec<String> = extract
            .extra_stopwords
            .iter()
            .map(|w| w.to_lowercase())
            .collect();
        stopwords.sort();
        stopwords.dedup();
        stopwords.hash(&mut hasher);

        Self(hasher.finish())
    }
}

impl fmt::Display for CacheScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
