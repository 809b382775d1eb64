//! Configuration system for `related`.
//!
//! Configuration lives in TOML files named `.related.toml`. It is resolved by walking up the
//! directory tree from the current working directory, collecting any `.related.toml` files
//! found, then loading `~/.related.toml` as the global config with lowest precedence.
//!
//! The settings here are the tunable policy of the ranker: tokenizer limits, extra stop words,
//! the similarity gate, composite weights and the session cache TTL.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawCacheSettings, RawConfig, RawExtractSettings, RawPostsSettings, RawRankSettings,
    parse_config_file, parse_config_str,
};
pub use resolve::resolve_path;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.related.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where posts are loaded from.
    pub posts: PostsSettings,
    /// Keyword extraction settings.
    pub extract: ExtractSettings,
    /// Ranking policy settings.
    pub rank: RankSettings,
    /// Session cache settings.
    pub cache: CacheSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.related.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// Paths are printed as resolved absolute paths.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            posts: SerializablePaths::from_path(self.posts.path.as_deref()),
            extract: self.extract.clone(),
            rank: self.rank.clone(),
            cache: SerializableCacheSettings::from(&self.cache),
        };
        toml::to_string_pretty(&serializable).map_err(ConfigError::SerializeToml)
    }
}

/// Location of the post collection.
#[derive(Debug, Clone, Default)]
pub struct PostsSettings {
    /// Resolved directory of posts, if configured.
    pub path: Option<PathBuf>,
}

/// Settings for the keyword extractor.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractSettings {
    /// Ignore words shorter than this (in characters).
    pub min_word_length: usize,
    /// Ignore words longer than this (in characters).
    pub max_word_length: usize,
    /// Ignore terms appearing fewer times than this in a document.
    pub min_term_frequency: usize,
    /// Stop words added on top of the built-in Italian list.
    pub extra_stopwords: Vec<String>,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            min_word_length: 3,
            max_word_length: 40,
            min_term_frequency: 1,
            extra_stopwords: Vec::new(),
        }
    }
}

/// Ranking policy: similarity gate, result count and composite weights.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RankSettings {
    /// Candidates with a cosine similarity below this are never returned.
    pub min_similarity: f32,
    /// Maximum related articles returned.
    pub max_results: usize,
    /// Weight of the content similarity component.
    pub similarity_weight: f32,
    /// Weight of the same-category component.
    pub category_weight: f32,
    /// Weight of the recency component.
    pub recency_weight: f32,
    /// Value of the category component when categories match.
    pub category_boost: f32,
    /// Age in days at which the recency component halves.
    pub recency_half_life_days: f32,
}

impl Default for RankSettings {
    fn default() -> Self {
        Self {
            min_similarity: 0.2,
            max_results: 3,
            similarity_weight: 1.0,
            category_weight: 0.1,
            recency_weight: 0.05,
            category_boost: 1.0,
            recency_half_life_days: 180.0,
        }
    }
}

impl RankSettings {
    /// Largest score contribution the category and recency components can add together.
    pub fn max_boost(&self) -> f32 {
        self.category_weight * self.category_boost + self.recency_weight
    }
}

/// Session cache settings.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Whether ranking results are cached between invocations.
    pub enabled: bool,
    /// Entries older than this are recomputed.
    pub ttl_seconds: u64,
    /// Cache directory override. `None` uses the platform cache directory.
    pub dir: Option<PathBuf>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 3600,
            dir: None,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Posts section.
    posts: SerializablePaths,
    /// Extract section.
    extract: ExtractSettings,
    /// Rank section.
    rank: RankSettings,
    /// Cache section.
    cache: SerializableCacheSettings,
}

/// Posts section with the path rendered as a string.
#[derive(Serialize)]
struct SerializablePaths {
    /// Resolved posts directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

impl SerializablePaths {
    /// Renders an optional path for display.
    fn from_path(path: Option<&Path>) -> Self {
        Self {
            path: path.map(|p| p.display().to_string()),
        }
    }
}

/// Cache section with the directory rendered as a string.
#[derive(Serialize)]
struct SerializableCacheSettings {
    /// Whether caching is enabled.
    enabled: bool,
    /// TTL in seconds.
    ttl_seconds: u64,
    /// Cache directory override.
    #[serde(skip_serializing_if = "Option::is_none")]
    dir: Option<String>,
}

impl From<&CacheSettings> for SerializableCacheSettings {
    fn from(cache: &CacheSettings) -> Self {
        Self {
            enabled: cache.enabled,
            ttl_seconds: cache.ttl_seconds,
            dir: cache.dir.as_ref().map(|p| p.display().to_string()),
        }
    }
}
