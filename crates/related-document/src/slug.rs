//! URL slugs for posts whose frontmatter does not set one.
//!
//! Titles are lowercased, accented letters lose their accent (`è` becomes `e`), and every run
//! of spaces, hyphens or apostrophes becomes a single `-`. Other punctuation is dropped.

use std::{collections::HashSet, mem};

/// Slug used when a title has no usable characters.
const FALLBACK_SLUG: &str = "post";

/// Builds the slug for a single title, with no collision handling.
pub fn slug_for(title: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut word = String::new();

    for c in title.chars().flat_map(char::to_lowercase).map(fold_accent) {
        if c.is_ascii_alphanumeric() || c == '_' {
            word.push(c);
        } else if matches!(c, ' ' | '-' | '\'' | '’') && !word.is_empty() {
            words.push(mem::take(&mut word));
        }
    }
    if !word.is_empty() {
        words.push(word);
    }

    if words.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        words.join("-")
    }
}

/// Hands out slugs that are unique across one load of a posts directory.
///
/// A taken slug gets the first free `-1`, `-2`, ... suffix.
#[derive(Debug, Default)]
pub struct Slugifier {
    /// Slugs already in use.
    taken: HashSet<String>,
}

impl Slugifier {
    /// An empty set of taken slugs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique slug for `title`.
    pub fn slugify(&mut self, title: &str) -> String {
        let base = slug_for(title);
        let slug = if self.taken.contains(&base) {
            (1..)
                .map(|n| format!("{base}-{n}"))
                .find(|candidate| !self.taken.contains(candidate))
                .unwrap_or(base)
        } else {
            base
        };
        self.taken.insert(slug.clone());
        slug
    }

    /// Marks a slug set explicitly in frontmatter as taken.
    pub fn reserve(&mut self, slug: &str) {
        self.taken.insert(slug.to_string());
    }
}

/// Drops the accent from Latin letters used in Italian and its neighbours.
fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'ö' | 'õ' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_for_titles() {
        for (title, expected) in [
            ("Dimagrimento", "dimagrimento"),
            ("Allenamento EMS a Milano", "allenamento-ems-a-milano"),
            ("Perché è così", "perche-e-cosi"),
            ("L'importanza dell'idratazione", "l-importanza-dell-idratazione"),
            ("EMS: funziona davvero?", "ems-funziona-davvero"),
            ("  Forza  --  Resistenza  ", "forza-resistenza"),
            ("5 esercizi in 20 minuti", "5-esercizi-in-20-minuti"),
        ] {
            assert_eq!(slug_for(title), expected, "{title}");
        }
    }

    #[test]
    fn test_punctuation_does_not_split_words() {
        assert_eq!(slug_for("Pre/post allenamento"), "prepost-allenamento");
    }

    #[test]
    fn test_duplicate_titles_get_suffixes() {
        let mut slugs = Slugifier::new();
        assert_eq!(slugs.slugify("Novità"), "novita");
        assert_eq!(slugs.slugify("Novità"), "novita-1");
        assert_eq!(slugs.slugify("Novita"), "novita-2");
    }

    #[test]
    fn test_reserved_slug_is_skipped() {
        let mut slugs = Slugifier::new();
        slugs.reserve("pilates");
        slugs.reserve("pilates-1");
        assert_eq!(slugs.slugify("Pilates"), "pilates-2");
    }

    #[test]
    fn test_suffix_does_not_collide_with_real_title() {
        let mut slugs = Slugifier::new();
        assert_eq!(slugs.slugify("Novità 1"), "novita-1");
        assert_eq!(slugs.slugify("Novità"), "novita");
        assert_eq!(slugs.slugify("Novità"), "novita-2");
    }

    #[test]
    fn test_empty_title_falls_back() {
        let mut slugs = Slugifier::new();
        assert_eq!(slugs.slugify(""), "post");
        assert_eq!(slugs.slugify("!?"), "post-1");
    }
}
