//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// No posts directory is configured.
    NoPostsPath,
    /// The posts path does not exist.
    PostsPathMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The posts path exists but is not a directory.
    PostsPathNotDirectory {
        /// Path that is not a directory.
        path: String,
    },
    /// The similarity gate is outside the range cosine similarity can take.
    MinSimilarityOutOfRange {
        /// Configured value.
        value: f32,
    },
    /// A composite weight is zero or negative.
    NonPositiveWeight {
        /// Setting name.
        name: &'static str,
        /// Configured value.
        value: f32,
    },
    /// Category and recency together can outweigh a full similarity point.
    BoostsOutweighSimilarity {
        /// Largest combined boost.
        max_boost: f32,
        /// Similarity weight.
        similarity_weight: f32,
    },
    /// The recency half-life is not a positive number of days.
    NonPositiveHalfLife {
        /// Configured value.
        value: f32,
    },
    /// `max_results` is zero, so nothing is ever returned.
    ZeroMaxResults,
    /// `min_word_length` is greater than `max_word_length`.
    WordLengthRangeEmpty {
        /// Minimum word length.
        min: usize,
        /// Maximum word length.
        max: usize,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPostsPath => write!(f, "no posts directory is configured"),
            Self::PostsPathMissing { path } => {
                write!(f, "posts path does not exist: {path}")
            }
            Self::PostsPathNotDirectory { path } => {
                write!(f, "posts path is not a directory: {path}")
            }
            Self::MinSimilarityOutOfRange { value } => {
                write!(f, "rank.min_similarity {value} is outside 0.0-1.0")
            }
            Self::NonPositiveWeight { name, value } => {
                write!(f, "rank.{name} should be positive, got {value}")
            }
            Self::BoostsOutweighSimilarity {
                max_boost,
                similarity_weight,
            } => write!(
                f,
                "category and recency boosts ({max_boost}) can outweigh similarity_weight ({similarity_weight})"
            ),
            Self::NonPositiveHalfLife { value } => {
                write!(f, "rank.recency_half_life_days should be positive, got {value}")
            }
            Self::ZeroMaxResults => write!(f, "rank.max_results is 0, no results will be shown"),
            Self::WordLengthRangeEmpty { min, max } => write!(
                f,
                "extract.min_word_length ({min}) is greater than extract.max_word_length ({max})"
            ),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = validate_posts(config);
    warnings.extend(validate_rank(config));

    let extract = &config.extract;
    if extract.min_word_length > extract.max_word_length {
        warnings.push(ConfigWarning::WordLengthRangeEmpty {
            min: extract.min_word_length,
            max: extract.max_word_length,
        });
    }

    warnings
}

/// Checks that the posts directory is configured and usable.
fn validate_posts(config: &Config) -> Vec<ConfigWarning> {
    let Some(path) = &config.posts.path else {
        return vec![ConfigWarning::NoPostsPath];
    };

    if !path.exists() {
        return vec![ConfigWarning::PostsPathMissing {
            path: path.display().to_string(),
        }];
    }

    if !path.is_dir() {
        return vec![ConfigWarning::PostsPathNotDirectory {
            path: path.display().to_string(),
        }];
    }

    Vec::new()
}

/// Checks the ranking policy keeps similarity the dominant signal.
fn validate_rank(config: &Config) -> Vec<ConfigWarning> {
    let rank = &config.rank;
    let mut warnings = Vec::new();

    if !(0.0..=1.0).contains(&rank.min_similarity) {
        warnings.push(ConfigWarning::MinSimilarityOutOfRange {
            value: rank.min_similarity,
        });
    }

    for (name, value) in [
        ("similarity_weight", rank.similarity_weight),
        ("category_weight", rank.category_weight),
        ("recency_weight", rank.recency_weight),
    ] {
        if value <= 0.0 {
            warnings.push(ConfigWarning::NonPositiveWeight { name, value });
        }
    }

    if rank.max_boost() >= rank.similarity_weight {
        warnings.push(ConfigWarning::BoostsOutweighSimilarity {
            max_boost: rank.max_boost(),
            similarity_weight: rank.similarity_weight,
        });
    }

    if rank.recency_half_life_days <= 0.0 {
        warnings.push(ConfigWarning::NonPositiveHalfLife {
            value: rank.recency_half_life_days,
        });
    }

    if rank.max_results == 0 {
        warnings.push(ConfigWarning::ZeroMaxResults);
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{PostsSettings, RankSettings, test_support::SiteFixture};

    fn config_with_posts(path: PathBuf) -> Config {
        Config {
            posts: PostsSettings { path: Some(path) },
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config_warns_about_posts_only() {
        let warnings = validate_config(&Config::default());
        assert_eq!(warnings, vec![ConfigWarning::NoPostsPath]);
    }

    #[test]
    fn test_valid_config_has_no_warnings() {
        let site = SiteFixture::new();
        let blog = site.dir("blog");
        assert!(validate_config(&config_with_posts(blog)).is_empty());
    }

    #[test]
    fn test_missing_posts_path() {
        let site = SiteFixture::new();
        let warnings = validate_config(&config_with_posts(site.path().join("missing")));
        assert!(matches!(
            warnings.as_slice(),
            [ConfigWarning::PostsPathMissing { .. }]
        ));
    }

    #[test]
    fn test_posts_path_is_file() {
        let site = SiteFixture::new();
        let file = site.dump("posts.json");
        let warnings = validate_config(&config_with_posts(file));
        assert!(matches!(
            warnings.as_slice(),
            [ConfigWarning::PostsPathNotDirectory { .. }]
        ));
    }

    #[test]
    fn test_boosts_outweigh_similarity() {
        let site = SiteFixture::new();
        let mut config = config_with_posts(site.dir("blog"));
        config.rank = RankSettings {
            category_weight: 0.8,
            recency_weight: 0.5,
            ..RankSettings::default()
        };

        let warnings = validate_config(&config);
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, ConfigWarning::BoostsOutweighSimilarity { .. }))
        );
    }

    #[test]
    fn test_rank_range_checks() {
        let site = SiteFixture::new();
        let mut config = config_with_posts(site.dir("blog"));
        config.rank.min_similarity = 1.5;
        config.rank.recency_weight = 0.0;
        config.rank.recency_half_life_days = -1.0;
        config.rank.max_results = 0;

        let warnings = validate_config(&config);
        assert!(warnings.contains(&ConfigWarning::MinSimilarityOutOfRange { value: 1.5 }));
        assert!(warnings.contains(&ConfigWarning::NonPositiveWeight {
            name: "recency_weight",
            value: 0.0
        }));
        assert!(warnings.contains(&ConfigWarning::NonPositiveHalfLife { value: -1.0 }));
        assert!(warnings.contains(&ConfigWarning::ZeroMaxResults));
    }

    #[test]
    fn test_word_length_range() {
        let site = SiteFixture::new();
        let mut config = config_with_posts(site.dir("blog"));
        config.extract.min_word_length = 10;
        config.extract.max_word_length = 5;

        let warnings = validate_config(&config);
        assert_eq!(
            warnings,
            vec![ConfigWarning::WordLengthRangeEmpty { min: 10, max: 5 }]
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = ConfigWarning::PostsPathMissing {
            path: "/srv/blog".into(),
        };
        assert_eq!(warning.to_string(), "posts path does not exist: /srv/blog");
    }
}
