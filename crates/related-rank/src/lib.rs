//! Related-article ranking.
//!
//! Given a target post and a pool of candidates, [`Ranker`] selects and orders the posts most
//! related to the target. The pipeline has four stages:
//!
//! 1. **Keyword extraction**: lowercased Unicode tokens with Italian stop words and short
//!    tokens removed ([`KeywordExtractor`])
//! 2. **Vectorization**: TF-IDF weights against one corpus made of the target and every
//!    candidate ([`Corpus`], [`vectorize`])
//! 3. **Similarity**: cosine of the weight vectors ([`cosine_similarity`])
//! 4. **Composite ranking**: similarity plus category and recency boosts, a hard similarity
//!    threshold, sorting and truncation ([`Ranker::rank_at`])
//!
//! Ranking is pure and infallible: malformed text is treated as empty text and degenerate
//! corpora have explicit formulas, so the worst outcome is a short or empty result.

#![warn(missing_docs)]

mod keyword;
mod rank;
mod similarity;
mod stopwords;
mod vector;

pub use keyword::{
    DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, KeywordExtractor, KeywordSet, extract, tokenize,
};
pub use rank::{Ranker, RankingPolicy, ScoredCandidate, rank, recency};
pub use similarity::cosine_similarity;
pub use stopwords::Stopwords;
pub use vector::{Corpus, IdfProvider, TermCounts, WeightVector, vectorize, vectorize_with};
