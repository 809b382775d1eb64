//! Stop word filtering for keyword extraction.
//!
//! The default list combines:
//! - Italian stop words from the `stop-words` crate (Stopwords ISO)
//! - A fixed list of Italian function words (articles, prepositions including articulated
//!   forms, conjunctions, pronouns and auxiliary verb forms)
//!
//! Stop words carry no topical signal, so they are removed before weighting.

use std::{collections::HashSet, sync::LazyLock};

use stop_words::LANGUAGE;

/// Shared default list, built once.
static DEFAULT: LazyLock<Stopwords> = LazyLock::new(Stopwords::new);

/// A stop word filter.
///
/// Words are stored lowercased; lookups lowercase their input, so matching is
/// case-insensitive for all of Unicode.
#[derive(Debug, Clone)]
pub struct Stopwords {
    /// Lowercased stop words.
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        DEFAULT.clone()
    }
}

impl Stopwords {
    /// Creates the default Italian stop word filter.
    pub fn new() -> Self {
        let mut words = HashSet::new();
        let mut add_words = |slice: &[&str]| {
            for word in slice {
                words.insert(word.to_lowercase());
            }
        };

        add_words(stop_words::get(LANGUAGE::Italian));
        add_words(ITALIAN_ARTICLES);
        add_words(ITALIAN_PREPOSITIONS);
        add_words(ITALIAN_CONJUNCTIONS);
        add_words(ITALIAN_PRONOUNS);
        add_words(ITALIAN_AUXILIARIES);

        Self { words }
    }

    /// Returns the shared default filter without cloning it.
    pub fn shared() -> &'static Self {
        &DEFAULT
    }

    /// Adds extra words on top of the current list.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            extra
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    /// Checks if a word is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        let lower = word.to_lowercase();
        lower != word && self.words.contains(&lower)
    }

    /// Returns the number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the filter holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Definite and indefinite articles, including elided forms.
static ITALIAN_ARTICLES: &[&str] = &[
    "il", "lo", "la", "i", "gli", "le", "un", "uno", "una", "l",
];

/// Simple and articulated prepositions.
static ITALIAN_PREPOSITIONS: &[&str] = &[
    "di", "a", "da", "in", "con", "su", "per", "tra", "fra", "del", "dello", "della", "dei",
    "degli", "delle", "dell", "al", "allo", "alla", "ai", "agli", "alle", "all", "dal", "dallo",
    "dalla", "dai", "dagli", "dalle", "dall", "nel", "nello", "nella", "nei", "negli", "nelle",
    "nell", "col", "coi", "sul", "sullo", "sulla", "sui", "sugli", "sulle", "sull", "verso",
    "senza", "sopra", "sotto", "dopo", "prima", "durante", "mediante", "presso",
];

/// Coordinating and subordinating conjunctions.
static ITALIAN_CONJUNCTIONS: &[&str] = &[
    "e", "ed", "o", "od", "ma", "però", "anche", "oppure", "né", "neanche", "neppure", "nemmeno",
    "che", "se", "perché", "poiché", "quando", "mentre", "come", "dove", "quindi", "dunque",
    "infatti", "cioè", "sia", "pure", "ossia", "ovvero", "affinché", "benché", "sebbene",
];

/// Personal, possessive, demonstrative and relative pronouns.
static ITALIAN_PRONOUNS: &[&str] = &[
    "io", "tu", "lui", "lei", "noi", "voi", "loro", "mi", "ti", "si", "ci", "vi", "ne", "me",
    "te", "se", "sé", "gli", "lo", "li", "mio", "mia", "miei", "mie", "tuo", "tua", "tuoi",
    "tue", "suo", "sua", "suoi", "sue", "nostro", "nostra", "nostri", "nostre", "vostro",
    "vostra", "vostri", "vostre", "questo", "questa", "questi", "queste", "quello", "quella",
    "quelli", "quelle", "quel", "quei", "quegli", "cui", "quale", "quali", "chi", "cosa", "ciò",
    "altro", "altra", "altri", "altre", "ogni", "tutto", "tutta", "tutti", "tutte", "qualche",
    "nessuno", "nessuna",
];

/// Forms of `essere`, `avere` and common modal verbs.
static ITALIAN_AUXILIARIES: &[&str] = &[
    "è", "sono", "sei", "siamo", "siete", "era", "erano", "ero", "eri", "stato", "stata",
    "stati", "state", "essere", "sarà", "saranno", "sarebbe", "siano", "ho", "hai", "ha",
    "abbiamo", "avete", "hanno", "avere", "aveva", "avevano", "avuto", "abbia", "può", "possono",
    "puoi", "posso", "deve", "devono", "devi", "vuole", "vogliono", "fa", "fanno", "fare",
    "viene", "vengono", "non", "più", "molto", "molti", "molta", "molte", "poco", "già", "ancora",
    "sempre", "mai", "così", "solo", "anche", "ecco",
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn contains_articles_and_prepositions() {
        let stopwords = Stopwords::new();
        for word in ["il", "della", "nell", "con", "per", "gli"] {
            assert!(stopwords.contains(word), "{word} should be a stop word");
        }
    }

    #[test]
    fn contains_conjunctions_and_pronouns() {
        let stopwords = Stopwords::new();
        for word in ["perché", "quindi", "questo", "loro", "cui"] {
            assert!(stopwords.contains(word), "{word} should be a stop word");
        }
    }

    #[test]
    fn is_case_insensitive() {
        let stopwords = Stopwords::new();
        assert!(stopwords.contains("Della"));
        assert!(stopwords.contains("PERCHÉ"));
    }

    #[test]
    fn topical_words_are_not_stopwords() {
        let stopwords = Stopwords::new();
        for word in ["ems", "dimagrimento", "allenamento", "proteine", "pilates"] {
            assert!(!stopwords.contains(word), "{word} should not be a stop word");
        }
    }

    #[test]
    fn with_extra_adds_words() {
        let stopwords = Stopwords::new().with_extra(["Palestra", "  ", "milano"]);
        assert!(stopwords.contains("palestra"));
        assert!(stopwords.contains("milano"));
        assert!(!stopwords.contains(""));
    }

    #[test]
    fn default_matches_new() {
        assert_eq!(Stopwords::default().len(), Stopwords::new().len());
        assert!(!Stopwords::shared().is_empty());
    }
}
