//! Configuration file parsing.
//!
//! Parses individual `.related.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Posts section.
    pub posts: Option<RawPostsSettings>,
    /// Keyword extraction section.
    pub extract: Option<RawExtractSettings>,
    /// Ranking section.
    pub rank: Option<RawRankSettings>,
    /// Cache section.
    pub cache: Option<RawCacheSettings>,
}

/// Raw posts section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPostsSettings {
    /// Directory of posts, relative to the config file.
    pub path: Option<String>,
}

/// Raw keyword extraction settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawExtractSettings {
    /// Minimum word length in characters.
    pub min_word_length: Option<usize>,
    /// Maximum word length in characters.
    pub max_word_length: Option<usize>,
    /// Minimum term frequency within a document.
    pub min_term_frequency: Option<usize>,
    /// Extra stop words. Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub extra_stopwords: Option<Vec<String>>,
}

/// Raw ranking settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRankSettings {
    /// Similarity gate.
    pub min_similarity: Option<f32>,
    /// Maximum results.
    pub max_results: Option<usize>,
    /// Weight of the similarity component.
    pub similarity_weight: Option<f32>,
    /// Weight of the category component.
    pub category_weight: Option<f32>,
    /// Weight of the recency component.
    pub recency_weight: Option<f32>,
    /// Category component value for matching categories.
    pub category_boost: Option<f32>,
    /// Recency half-life in days.
    pub recency_half_life_days: Option<f32>,
}

/// Raw cache settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCacheSettings {
    /// Whether caching is enabled.
    pub enabled: Option<bool>,
    /// Entry lifetime in seconds.
    pub ttl_seconds: Option<u64>,
    /// Cache directory, relative to the config file.
    pub dir: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> RawConfig {
        parse_config_str(toml, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse("");
        assert!(config.root.is_none());
        assert!(config.posts.is_none());
        assert!(config.extract.is_none());
        assert!(config.rank.is_none());
        assert!(config.cache.is_none());
    }

    #[test]
    fn test_parse_posts() {
        let config = parse("[posts]\npath = \"./content/blog\"\n");
        assert_eq!(
            config.posts.unwrap().path.as_deref(),
            Some("./content/blog")
        );
    }

    #[test]
    fn test_parse_rank_partial() {
        let config = parse("[rank]\nmin_similarity = 0.1\nmax_results = 5\n");
        let rank = config.rank.unwrap();
        assert_eq!(rank.min_similarity, Some(0.1));
        assert_eq!(rank.max_results, Some(5));
        assert!(rank.similarity_weight.is_none());
        assert!(rank.recency_half_life_days.is_none());
    }

    #[test]
    fn test_parse_stopwords_single_string() {
        let config = parse("[extract]\nextra_stopwords = \"palestra\"\n");
        assert_eq!(
            config.extract.unwrap().extra_stopwords,
            Some(vec!["palestra".to_string()])
        );
    }

    #[test]
    fn test_parse_stopwords_array() {
        let config = parse("[extract]\nextra_stopwords = [\"palestra\", \"milano\"]\n");
        assert_eq!(
            config.extract.unwrap().extra_stopwords,
            Some(vec!["palestra".to_string(), "milano".to_string()])
        );
    }

    #[test]
    fn test_parse_cache() {
        let config = parse("[cache]\nenabled = false\nttl_seconds = 60\n");
        let cache = config.cache.unwrap();
        assert_eq!(cache.enabled, Some(false));
        assert_eq!(cache.ttl_seconds, Some(60));
        assert!(cache.dir.is_none());
    }

    #[test]
    fn test_parse_root_flag() {
        assert_eq!(parse("root = true\n").root, Some(true));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_config_str("[rank\nmax_results = 3", Path::new("bad.toml"));
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn test_parse_unknown_section_is_error() {
        let result = parse_config_str("[search]\nstemmer = \"italian\"\n", Path::new("x.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_wrong_type_is_error() {
        let result = parse_config_str("[rank]\nmax_results = \"three\"\n", Path::new("x.toml"));
        assert!(result.is_err());
    }
}
