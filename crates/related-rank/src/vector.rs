//! TF-IDF term weight vectors.
//!
//! Every document in one ranking pass is weighted against the same corpus, otherwise
//! similarities are not comparable. The weight of a keyword is:
//!
//! - TF: occurrences of the keyword among the document's tokens, divided by the count of its
//!   most frequent token
//! - IDF: `ln(1 + N / (1 + df))` where `N` is the corpus size and `df` the number of corpus
//!   texts containing the keyword. A corpus of zero or one text uses `ln 2`.
//!
//! Keywords that do not occur in the document are omitted.

use std::{
    collections::{BTreeMap, HashMap},
    f32::consts::LN_2,
};

use crate::{KeywordSet, tokenize};

/// Sparse keyword → weight map. Weights are finite and non-negative.
///
/// Ordered so that floating point sums over it are reproducible.
pub type WeightVector = BTreeMap<String, f32>;

/// Source of inverse document frequencies.
///
/// [`Corpus`] computes them from the texts of one ranking pass; a precomputed index over a
/// larger collection can implement this trait instead.
pub trait IdfProvider {
    /// Returns the IDF of a term, or `None` if the term is unknown and should be ignored.
    fn idf(&self, term: &str) -> Option<f32>;
}

/// Token counts for one text.
#[derive(Debug, Clone, Default)]
pub struct TermCounts {
    /// Occurrences per lowercased token.
    counts: HashMap<String, u32>,
    /// Count of the most frequent token.
    max: u32,
}

impl TermCounts {
    /// Counts the tokens of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for token in tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        let max = counts.values().copied().max().unwrap_or(0);
        Self { counts, max }
    }

    /// Occurrences of a token.
    pub fn count(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Max-normalized term frequency in `[0, 1]`.
    pub fn tf(&self, term: &str) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.count(term) as f32 / self.max as f32
    }

    /// Returns true if the text contains the token.
    pub fn contains(&self, term: &str) -> bool {
        self.counts.contains_key(term)
    }
}

/// The texts of one ranking pass, tokenized once.
///
/// Lives for one ranking call and is never persisted.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Token counts per text, in input order.
    documents: Vec<TermCounts>,
    /// Number of texts containing each token.
    document_frequency: HashMap<String, usize>,
}

impl Corpus {
    /// Builds a corpus from its texts.
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let documents: Vec<TermCounts> = texts
            .into_iter()
            .map(|t| TermCounts::from_text(t.as_ref()))
            .collect();

        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for doc in &documents {
            for term in doc.counts.keys() {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
        }

        Self {
            documents,
            document_frequency,
        }
    }

    /// Number of texts in the corpus.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the corpus has no texts.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of texts containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    /// Token counts of the text at `index`.
    pub fn counts(&self, index: usize) -> Option<&TermCounts> {
        self.documents.get(index)
    }

    /// Weight vector for the corpus text at `index`.
    ///
    /// An out-of-range index yields an empty vector.
    pub fn vector(&self, keywords: &KeywordSet, index: usize) -> WeightVector {
        match self.documents.get(index) {
            Some(counts) => weigh(keywords, counts, self),
            None => WeightVector::new(),
        }
    }
}

impl IdfProvider for Corpus {
    fn idf(&self, term: &str) -> Option<f32> {
        let n = self.documents.len();
        if n <= 1 {
            return Some(LN_2);
        }
        let df = self.document_frequency(term);
        Some((1.0 + n as f32 / (1.0 + df as f32)).ln())
    }
}

/// Weighs `keywords` by their frequency in `document_text` and their IDF over
/// `corpus_texts`.
///
/// Builds a throwaway [`Corpus`]; when weighting many documents against the same texts,
/// build the corpus once and use [`Corpus::vector`] or [`vectorize_with`].
pub fn vectorize<S: AsRef<str>>(
    keywords: &KeywordSet,
    document_text: &str,
    corpus_texts: &[S],
) -> WeightVector {
    let corpus = Corpus::new(corpus_texts);
    vectorize_with(keywords, document_text, &corpus)
}

/// Weighs `keywords` in `document_text` using IDF values from `idf`.
pub fn vectorize_with<P: IdfProvider>(
    keywords: &KeywordSet,
    document_text: &str,
    idf: &P,
) -> WeightVector {
    weigh(keywords, &TermCounts::from_text(document_text), idf)
}

/// TF × IDF for every keyword present in `counts`.
fn weigh<P: IdfProvider>(keywords: &KeywordSet, counts: &TermCounts, idf: &P) -> WeightVector {
    keywords
        .iter()
        .filter_map(|keyword| {
            let tf = counts.tf(keyword);
            if tf <= 0.0 {
                return None;
            }
            let weight = tf * idf.idf(keyword)?;
            (weight.is_finite() && weight > 0.0).then(|| (keyword.clone(), weight))
        })
        .collect()
}
