//! Keyword extraction.
//!
//! Text is lowercased with full Unicode case mapping and split on every character that is
//! not alphanumeric. Accented letters stay inside words; the apostrophe of elisions such as
//! `dell'allenamento` separates. Tokens that are too short, too long, purely numeric, or
//! stop words are discarded and the rest deduplicated.

use std::collections::{BTreeSet, HashMap, btree_set};

use related_config::ExtractSettings;
use related_document::Document;
use serde::Serialize;

use crate::Stopwords;

/// Default minimum keyword length in characters.
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// Default maximum keyword length in characters.
pub const DEFAULT_MAX_LENGTH: usize = 40;

/// A deduplicated, ordered set of keywords.
///
/// Never contains empty strings, stop words, or tokens outside the extractor's length bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeywordSet(BTreeSet<String>);

impl KeywordSet {
    /// Returns true if the set contains the keyword.
    pub fn contains(&self, keyword: &str) -> bool {
        self.0.contains(keyword)
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no keywords were extracted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates keywords in lexical order.
    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.0.iter()
    }

    /// Adds every keyword of `other`.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for KeywordSet {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Splits text into lowercased tokens without any filtering.
///
/// This is the token stream term frequencies are counted over, so it must stay in step with
/// the extractor.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Extracts keywords from `text` with the default Italian stop words.
///
/// Tokens shorter than `min_length` characters are discarded.
pub fn extract(text: &str, min_length: usize) -> KeywordSet {
    filter_tokens(
        text,
        Stopwords::shared(),
        min_length,
        DEFAULT_MAX_LENGTH,
        1,
    )
}

/// Configurable keyword extractor.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    /// Words never returned as keywords.
    stopwords: Stopwords,
    /// Minimum token length in characters.
    min_length: usize,
    /// Maximum token length in characters.
    max_length: usize,
    /// Minimum number of occurrences in the text.
    min_frequency: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self {
            stopwords: Stopwords::default(),
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            min_frequency: 1,
        }
    }
}

impl KeywordExtractor {
    /// Creates an extractor with the default stop words and the given minimum length.
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            ..Self::default()
        }
    }

    /// Creates an extractor from configuration.
    pub fn from_settings(settings: &ExtractSettings) -> Self {
        Self {
            stopwords: Stopwords::default().with_extra(&settings.extra_stopwords),
            min_length: settings.min_word_length,
            max_length: settings.max_word_length,
            min_frequency: settings.min_term_frequency.max(1),
        }
    }

    /// Replaces the stop word list.
    pub fn with_stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Extracts keywords from arbitrary text.
    pub fn extract(&self, text: &str) -> KeywordSet {
        filter_tokens(
            text,
            &self.stopwords,
            self.min_length,
            self.max_length,
            self.min_frequency,
        )
    }

    /// Extracts the keywords of a document.
    ///
    /// Title, excerpt and markup-stripped body are subject to the frequency threshold;
    /// explicit keywords always count, but are still split and filtered like any other text.
    pub fn document_keywords(&self, document: &Document) -> KeywordSet {
        let mut keywords = self.extract(&document.searchable_text());
        for explicit in &document.keywords {
            keywords.extend(filter_tokens(
                explicit,
                &self.stopwords,
                self.min_length,
                self.max_length,
                1,
            ));
        }
        keywords
    }
}

/// Tokenizes and filters text into a keyword set.
fn filter_tokens(
    text: &str,
    stopwords: &Stopwords,
    min_length: usize,
    max_length: usize,
    min_frequency: usize,
) -> KeywordSet {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in tokenize(text) {
        let len = token.chars().count();
        if len < min_length || len > max_length {
            continue;
        }
        if token.chars().all(char::is_numeric) || stopwords.contains(&token) {
            continue;
        }
        *counts.entry(token).or_insert(0) += 1;
    }

    KeywordSet(
        counts
            .into_iter()
            .filter(|(_, count)| *count >= min_frequency)
            .map(|(token, _)| token)
            .collect(),
    )
}
