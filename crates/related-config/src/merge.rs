//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    CacheSettings, Config, ConfigError, ExtractSettings, PostsSettings, RankSettings,
    parse::{RawCacheSettings, RawConfig, RawExtractSettings, RawRankSettings},
    resolve::resolve_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file, against which relative paths resolve.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins (highest precedence)
/// - Paths: first defined value wins, resolved relative to the file that defined it
/// - Extra stop words: union of all files
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let posts = merge_posts(configs)?;
    let extract = merge_extract(configs);
    let rank = merge_rank(configs);
    let cache = merge_cache(configs)?;
    let config_root = configs.first().map(|c| c.dir().to_path_buf());

    Ok(Config {
        posts,
        extract,
        rank,
        cache,
        config_root,
    })
}

/// Resolves the posts path from the highest-precedence file that sets one.
fn merge_posts(configs: &[ParsedConfig]) -> Result<PostsSettings, ConfigError> {
    for parsed in configs {
        if let Some(path) = parsed
            .config
            .posts
            .as_ref()
            .and_then(|p| p.path.as_deref())
        {
            return Ok(PostsSettings {
                path: Some(resolve_path(path, parsed.dir())?),
            });
        }
    }
    Ok(PostsSettings::default())
}

/// Merges extraction settings.
fn merge_extract(configs: &[ParsedConfig]) -> ExtractSettings {
    let mut result = ExtractSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref extract) = parsed.config.extract {
            apply_raw_extract(&mut result, extract);
        }
    }

    result
}

/// Applies raw extraction settings to result.
fn apply_raw_extract(result: &mut ExtractSettings, raw: &RawExtractSettings) {
    if let Some(v) = raw.min_word_length {
        result.min_word_length = v;
    }
    if let Some(v) = raw.max_word_length {
        result.max_word_length = v;
    }
    if let Some(v) = raw.min_term_frequency {
        result.min_term_frequency = v;
    }
    if let Some(ref words) = raw.extra_stopwords {
        for word in words {
            if !result.extra_stopwords.contains(word) {
                result.extra_stopwords.push(word.clone());
            }
        }
    }
}

/// Merges ranking settings.
fn merge_rank(configs: &[ParsedConfig]) -> RankSettings {
    let mut result = RankSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref rank) = parsed.config.rank {
            apply_raw_rank(&mut result, rank);
        }
    }

    result
}

/// Applies raw ranking settings to result.
fn apply_raw_rank(result: &mut RankSettings, raw: &RawRankSettings) {
    if let Some(v) = raw.min_similarity {
        result.min_similarity = v;
    }
    if let Some(v) = raw.max_results {
        result.max_results = v;
    }
    if let Some(v) = raw.similarity_weight {
        result.similarity_weight = v;
    }
    if let Some(v) = raw.category_weight {
        result.category_weight = v;
    }
    if let Some(v) = raw.recency_weight {
        result.recency_weight = v;
    }
    if let Some(v) = raw.category_boost {
        result.category_boost = v;
    }
    if let Some(v) = raw.recency_half_life_days {
        result.recency_half_life_days = v;
    }
}

/// Merges cache settings, resolving the directory against its defining file.
fn merge_cache(configs: &[ParsedConfig]) -> Result<CacheSettings, ConfigError> {
    let mut result = CacheSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref cache) = parsed.config.cache {
            apply_raw_cache(&mut result, cache, parsed.dir())?;
        }
    }

    Ok(result)
}

/// Applies raw cache settings to result.
fn apply_raw_cache(
    result: &mut CacheSettings,
    raw: &RawCacheSettings,
    config_dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(v) = raw.enabled {
        result.enabled = v;
    }
    if let Some(v) = raw.ttl_seconds {
        result.ttl_seconds = v;
    }
    if let Some(ref dir) = raw.dir {
        result.dir = Some(resolve_path(dir, config_dir)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse::parse_config_str, test_support::SiteFixture};

    fn parsed(dir: &Path, toml: &str) -> ParsedConfig {
        let path = dir.join(crate::CONFIG_FILENAME);
        ParsedConfig {
            config: parse_config_str(toml, &path).unwrap(),
            path,
        }
    }

    #[test]
    fn test_merge_empty() {
        let config = merge_configs(&[]).unwrap();
        assert!(config.config_root.is_none());
        assert_eq!(config.rank.max_results, 3);
    }

    #[test]
    fn test_higher_precedence_wins() {
        let site = SiteFixture::new();
        let inner = site.dir("site");
        let configs = vec![
            parsed(&inner, "[rank]\nmax_results = 5\n"),
            parsed(site.path(), "[rank]\nmax_results = 8\nmin_similarity = 0.3\n"),
        ];

        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.rank.max_results, 5);
        assert!((config.rank.min_similarity - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.config_root, Some(inner));
    }

    #[test]
    fn test_posts_path_resolves_against_defining_file() {
        let site = SiteFixture::new();
        let blog = site.dir("blog");
        let inner = site.dir("site");
        let configs = vec![
            parsed(&inner, "[rank]\nmax_results = 5\n"),
            parsed(site.path(), "[posts]\npath = \"blog\"\n"),
        ];

        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.posts.path, Some(blog.canonicalize().unwrap()));
    }

    #[test]
    fn test_stopwords_are_unioned() {
        let site = SiteFixture::new();
        let inner = site.dir("site");
        let configs = vec![
            parsed(&inner, "[extract]\nextra_stopwords = [\"milano\", \"ems\"]\n"),
            parsed(site.path(), "[extract]\nextra_stopwords = \"milano\"\n"),
        ];

        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.extract.extra_stopwords, vec!["milano", "ems"]);
    }

    #[test]
    fn test_cache_settings_merge() {
        let site = SiteFixture::new();
        let cache_dir = site.dir("cache");
        let configs = vec![parsed(
            site.path(),
            "[cache]\nttl_seconds = 10\ndir = \"cache\"\n",
        )];

        let config = merge_configs(&configs).unwrap();
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_seconds, 10);
        assert_eq!(config.cache.dir, Some(cache_dir.canonicalize().unwrap()));
    }
}
