//! Composite ranking of related documents.
//!
//! Each candidate is scored as
//!
//! ```text
//! score = similarity * similarity_weight
//!       + category_boost * category_weight
//!       + recency * recency_weight
//! ```
//!
//! where `similarity` is the cosine of the TF-IDF vectors of target and candidate over the
//! corpus {target} ∪ candidates, `category_boost` is non-zero only when both documents carry
//! the same category, and `recency` halves every `half_life_days`. Candidates below the
//! similarity threshold are dropped before sorting, whatever their boosts.

use std::{cmp::Ordering, iter};

use chrono::{DateTime, Utc};
use related_config::{ExtractSettings, RankSettings};
use related_document::Document;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{Corpus, KeywordExtractor, cosine_similarity};

/// Seconds per day, for recency decay.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Tunable ranking policy.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingPolicy {
    /// Candidates with similarity strictly below this are never returned.
    pub min_similarity: f32,
    /// Maximum number of results.
    pub max_results: usize,
    /// Weight of the similarity component.
    pub similarity_weight: f32,
    /// Weight of the category component.
    pub category_weight: f32,
    /// Weight of the recency component.
    pub recency_weight: f32,
    /// Category component value when categories match.
    pub category_boost: f32,
    /// Age in days at which recency halves.
    pub half_life_days: f32,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self::from(&RankSettings::default())
    }
}

impl From<&RankSettings> for RankingPolicy {
    fn from(settings: &RankSettings) -> Self {
        Self {
            min_similarity: settings.min_similarity,
            max_results: settings.max_results,
            similarity_weight: settings.similarity_weight,
            category_weight: settings.category_weight,
            recency_weight: settings.recency_weight,
            category_boost: settings.category_boost,
            half_life_days: settings.recency_half_life_days,
        }
    }
}

impl RankingPolicy {
    /// Sets the similarity threshold.
    pub fn with_min_similarity(mut self, min_similarity: f32) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    /// Sets the maximum number of results.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Combines the three components into a composite score.
    pub fn score(&self, similarity: f32, category_boost: f32, recency: f32) -> f32 {
        similarity * self.similarity_weight
            + category_boost * self.category_weight
            + recency * self.recency_weight
    }
}

/// A candidate with its score components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// The related document.
    pub document: Document,
    /// Cosine similarity to the target, in `[0, 1]`.
    pub similarity: f32,
    /// Category component before weighting.
    pub category_boost: f32,
    /// Recency component before weighting, in `[0, 1]`.
    pub recency: f32,
    /// Composite score.
    pub score: f32,
}

/// Recency decay: 1 for a document published at `now`, halving every `half_life_days`.
///
/// Documents dated in the future count as brand new. A non-positive half-life disables the
/// component.
pub fn recency(published_at: DateTime<Utc>, now: DateTime<Utc>, half_life_days: f32) -> f32 {
    if half_life_days <= 0.0 || !half_life_days.is_finite() {
        return 0.0;
    }
    let age_days = (now - published_at).num_seconds() as f64 / SECONDS_PER_DAY;
    if age_days <= 0.0 {
        return 1.0;
    }
    (0.5f64.powf(age_days / f64::from(half_life_days)) as f32).clamp(0.0, 1.0)
}

/// Ranks related documents.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    /// Weights and thresholds.
    policy: RankingPolicy,
    /// Keyword extractor applied to every document.
    extractor: KeywordExtractor,
}

impl Ranker {
    /// Creates a ranker.
    pub fn new(policy: RankingPolicy, extractor: KeywordExtractor) -> Self {
        Self { policy, extractor }
    }

    /// Creates a ranker from configuration.
    pub fn from_settings(rank: &RankSettings, extract: &ExtractSettings) -> Self {
        Self::new(
            RankingPolicy::from(rank),
            KeywordExtractor::from_settings(extract),
        )
    }

    /// The policy in use.
    pub fn policy(&self) -> &RankingPolicy {
        &self.policy
    }

    /// The keyword extractor in use.
    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    /// Ranks `candidates` against `target` using the current time for recency.
    pub fn rank(&self, target: &Document, candidates: &[Document]) -> Vec<ScoredCandidate> {
        self.rank_at(target, candidates, Utc::now())
    }

    /// Ranks `candidates` against `target` as of `now`.
    ///
    /// Candidates with the target's id are ignored. The result has at most
    /// `policy.max_results` entries, sorted by score, then newest first, then by id.
    pub fn rank_at(
        &self,
        target: &Document,
        candidates: &[Document],
        now: DateTime<Utc>,
    ) -> Vec<ScoredCandidate> {
        let pool: Vec<&Document> = candidates.iter().filter(|c| c.id != target.id).collect();
        if pool.is_empty() || self.policy.max_results == 0 {
            debug!(document = %target.id, "no candidates to rank");
            return Vec::new();
        }

        let documents: Vec<&Document> = iter::once(target).chain(pool.iter().copied()).collect();
        let corpus = Corpus::new(documents.iter().map(|d| d.searchable_text()));
        let target_vector = corpus.vector(&self.extractor.document_keywords(target), 0);

        let mut scored: Vec<ScoredCandidate> = pool
            .iter()
            .enumerate()
            .filter_map(|(i, candidate)| {
                let keywords = self.extractor.document_keywords(candidate);
                let similarity = cosine_similarity(&target_vector, &corpus.vector(&keywords, i + 1));
                if similarity < self.policy.min_similarity {
                    trace!(candidate = %candidate.id, similarity, "below similarity threshold");
                    return None;
                }
                Some(self.score(target, candidate, similarity, now))
            })
            .collect();

        sort_candidates(&mut scored);
        scored.truncate(self.policy.max_results);

        debug!(
            document = %target.id,
            candidates = pool.len(),
            results = scored.len(),
            "ranked related documents"
        );
        scored
    }

    /// Computes the boosts and composite score for one candidate.
    fn score(
        &self,
        target: &Document,
        candidate: &Document,
        similarity: f32,
        now: DateTime<Utc>,
    ) -> ScoredCandidate {
        let category_boost = if target.shares_category(candidate) {
            self.policy.category_boost
        } else {
            0.0
        };
        let recency = recency(candidate.published_at, now, self.policy.half_life_days);
        let score = self.policy.score(similarity, category_boost, recency);
        trace!(candidate = %candidate.id, similarity, category_boost, recency, score, "scored");

        ScoredCandidate {
            document: candidate.clone(),
            similarity,
            category_boost,
            recency,
            score,
        }
    }
}

/// Ranks `candidates` against `target` with default weights and stop words.
pub fn rank(
    target: &Document,
    candidates: &[Document],
    min_similarity: f32,
    max_results: usize,
) -> Vec<ScoredCandidate> {
    let policy = RankingPolicy::default()
        .with_min_similarity(min_similarity)
        .with_max_results(max_results);
    Ranker::new(policy, KeywordExtractor::default()).rank(target, candidates)
}

/// Sorts by score descending, then publish date descending, then id ascending.
fn sort_candidates(scored: &mut [ScoredCandidate]) {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.document.published_at.cmp(&a.document.published_at))
            .then_with(|| a.document.id.cmp(&b.document.id))
    });
}

#[cfg(test)]
mod test {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    /// Untitled document carrying only explicit keywords, `days_ago` days before [`now`].
    fn doc(id: &str, category: &str, keywords: &[&str], days_ago: i64) -> Document {
        let doc = Document::new(id, "", "", now() - Duration::days(days_ago))
            .with_keywords(keywords.iter().copied());
        if category.is_empty() {
            doc
        } else {
            doc.with_category(category)
        }
    }

    fn ids(results: &[ScoredCandidate]) -> Vec<&str> {
        results.iter().map(|r| r.document.id.as_str()).collect()
    }

    fn ranker(min_similarity: f32, max_results: usize) -> Ranker {
        Ranker::new(
            RankingPolicy::default()
                .with_min_similarity(min_similarity)
                .with_max_results(max_results),
            KeywordExtractor::default(),
        )
    }

    #[test]
    fn shared_keyword_candidate_is_related() {
        let target = doc("t", "fitness", &["ems", "dimagrimento"], 0);
        let a = doc("a", "fitness", &["ems", "allenamento"], 0);
        let b = doc("b", "nutrizione", &["proteine"], 0);

        let results = ranker(0.1, 3).rank_at(&target, &[a, b], now());
        assert_eq!(ids(&results), vec!["a"]);
        assert!(results[0].similarity > 0.1);
        assert!((results[0].category_boost - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let target = doc("t", "fitness", &["ems"], 0);
        assert!(ranker(0.2, 3).rank_at(&target, &[], now()).is_empty());
    }

    #[test]
    fn output_truncated_to_max_results() {
        let target = doc("t", "", &["ems"], 0);
        let pool: Vec<Document> = ["pilates", "yoga", "proteine", "addominali", "corsa"]
            .iter()
            .enumerate()
            .map(|(i, kw)| doc(&format!("c{i}"), "", &["ems", *kw], i as i64))
            .collect();

        let results = ranker(0.2, 3).rank_at(&target, &pool, now());
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn target_alone_in_pool_yields_nothing() {
        let target = doc("t", "fitness", &["ems", "dimagrimento"], 0);
        let results = ranker(0.0, 3).rank_at(&target, &[target.clone()], now());
        assert!(results.is_empty());
    }

    #[test]
    fn target_never_in_results() {
        let target = doc("t", "fitness", &["ems", "dimagrimento"], 0);
        let other = doc("o", "fitness", &["ems", "dimagrimento"], 1);
        let results = ranker(0.0, 10).rank_at(&target, &[target.clone(), other], now());
        assert_eq!(ids(&results), vec!["o"]);
    }

    #[test]
    fn equal_similarity_newer_first() {
        let target = doc("t", "fitness", &["ems", "dimagrimento"], 0);
        let older = doc("old", "fitness", &["ems", "allenamento"], 30);
        let newer = doc("new", "fitness", &["ems", "allenamento"], 2);

        let results = ranker(0.1, 3).rank_at(&target, &[older, newer], now());
        assert_eq!(ids(&results), vec!["new", "old"]);
        assert_eq!(results[0].similarity, results[1].similarity);
    }

    #[test]
    fn ties_fall_back_to_publish_date_then_id() {
        let policy = RankingPolicy {
            recency_weight: 0.0,
            ..RankingPolicy::default()
        }
        .with_min_similarity(0.1);
        let ranker = Ranker::new(policy, KeywordExtractor::default());

        let target = doc("t", "", &["ems", "dimagrimento"], 0);
        let older = doc("b-old", "", &["ems", "allenamento"], 30);
        let newer = doc("c-new", "", &["ems", "allenamento"], 2);
        let same_day = doc("a-new", "", &["ems", "allenamento"], 2);

        let results = ranker.rank_at(&target, &[older, newer, same_day], now());
        assert_eq!(ids(&results), vec!["a-new", "c-new", "b-old"]);
    }

    #[test]
    fn threshold_gate_ignores_boosts() {
        let target = doc("t", "fitness", &["ems", "dimagrimento"], 0);
        let boosted = doc("boosted", "fitness", &["proteine"], 0);
        let related = doc("related", "altro", &["ems", "dimagrimento", "corsa"], 400);

        let results = ranker(0.2, 3).rank_at(&target, &[boosted, related], now());
        assert_eq!(ids(&results), vec!["related"]);
    }

    #[test]
    fn higher_similarity_ranks_first() {
        let target = doc("t", "fitness", &["ems", "dimagrimento", "addominali"], 0);
        let close = doc("close", "fitness", &["ems", "dimagrimento", "addominali"], 10);
        let far = doc("far", "fitness", &["ems", "corsa", "proteine"], 10);

        let results = ranker(0.0, 3).rank_at(&target, &[far, close], now());
        assert_eq!(ids(&results), vec!["close", "far"]);
        assert!(results[0].similarity > results[1].similarity);
    }

    #[test]
    fn target_without_keywords_gates_everything() {
        let target = Document::new("t", "", "il la di", now());
        let pool = vec![doc("a", "", &["ems"], 0), doc("b", "", &["yoga"], 0)];
        let results = ranker(0.2, 3).rank_at(&target, &pool, now());
        assert!(results.is_empty());
    }

    #[test]
    fn ranking_is_deterministic() {
        let target = doc("t", "fitness", &["ems", "dimagrimento", "addominali"], 0);
        let pool: Vec<Document> = (0..8)
            .map(|i| {
                let kw = if i % 2 == 0 { "dimagrimento" } else { "addominali" };
                doc(&format!("d{i}"), "fitness", &["ems", kw], i)
            })
            .collect();

        let r = ranker(0.1, 5);
        assert_eq!(r.rank_at(&target, &pool, now()), r.rank_at(&target, &pool, now()));
    }

    #[test]
    fn zero_max_results_yields_nothing() {
        let target = doc("t", "", &["ems"], 0);
        let pool = vec![doc("a", "", &["ems"], 0)];
        assert!(ranker(0.0, 0).rank_at(&target, &pool, now()).is_empty());
    }

    #[test]
    fn scores_combine_components() {
        let target = doc("t", "fitness", &["ems", "dimagrimento"], 0);
        let a = doc("a", "fitness", &["ems", "dimagrimento"], 0);

        let results = ranker(0.0, 1).rank_at(&target, &[a], now());
        let r = &results[0];
        let policy = RankingPolicy::default();
        assert!((r.score - policy.score(r.similarity, 1.0, 1.0)).abs() < 1e-6);
        assert!((r.recency - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn recency_halves_each_half_life() {
        let published = now() - Duration::days(180);
        assert!((recency(published, now(), 180.0) - 0.5).abs() < 1e-4);
        assert!((recency(now() - Duration::days(360), now(), 180.0) - 0.25).abs() < 1e-4);
    }

    #[test]
    fn recency_bounds() {
        assert!((recency(now() + Duration::days(5), now(), 180.0) - 1.0).abs() < f32::EPSILON);
        assert!((recency(now(), now(), 180.0) - 1.0).abs() < f32::EPSILON);
        let ancient = recency(now() - Duration::days(365 * 50), now(), 180.0);
        assert!((0.0..0.001).contains(&ancient));
        assert_eq!(recency(now(), now(), 0.0), 0.0);
    }

    #[test]
    fn default_policy_lets_similarity_dominate() {
        let policy = RankingPolicy::default();
        assert!(policy.similarity_weight >= policy.category_weight);
        assert!(policy.similarity_weight >= policy.recency_weight);
        assert!(policy.category_weight * policy.category_boost + policy.recency_weight < 0.2);
    }

    #[test]
    fn policy_from_settings() {
        let settings = RankSettings {
            min_similarity: 0.35,
            max_results: 5,
            ..RankSettings::default()
        };
        let policy = RankingPolicy::from(&settings);
        assert_eq!(policy.max_results, 5);
        assert!((policy.min_similarity - 0.35).abs() < f32::EPSILON);
    }

    #[test]
    fn free_rank_uses_defaults() {
        let target = doc("t", "fitness", &["ems", "dimagrimento"], 0);
        let pool = vec![doc("a", "fitness", &["ems", "allenamento"], 0)];
        let results = rank(&target, &pool, 0.1, 3);
        assert_eq!(ids(&results), vec!["a"]);
    }

    #[test]
    fn scored_candidate_serde() {
        let target = doc("t", "fitness", &["ems"], 0);
        let results = ranker(0.0, 1).rank_at(&target, &[doc("a", "fitness", &["ems"], 0)], now());
        let json = serde_json::to_string(&results).unwrap();
        let back: Vec<ScoredCandidate> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, results);
    }
}
