//! Clap argument definitions for the `related` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "related")]
#[command(about = "Related-article ranker for markdown blogs")]
pub struct Cli {
    /// Log verbosity (-v for debug, -vv for trace). RUST_LOG overrides.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared flag selecting the post collection.
#[derive(Args, Debug, Clone, Default)]
pub struct PostsArgs {
    /// Directory (or JSON file) of posts [default: posts.path from configuration]
    #[arg(short = 'p', long = "posts")]
    pub path: Option<PathBuf>,
}

/// Arguments for `related rank`.
#[derive(Args, Debug, Clone)]
pub struct RankCommand {
    /// Id or slug of the post to find related articles for
    pub id: String,

    #[command(flatten)]
    /// Post collection override.
    pub posts: PostsArgs,

    /// Maximum related articles to return [default: rank.max_results]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Minimum cosine similarity (0.0-1.0) [default: rank.min_similarity]
    #[arg(long)]
    pub min_similarity: Option<f32>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Recompute instead of reading or writing the ranking cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for `related keywords`.
#[derive(Args, Debug, Clone)]
pub struct KeywordsCommand {
    /// Id or slug of the post to analyze
    pub id: String,

    #[command(flatten)]
    /// Post collection override.
    pub posts: PostsArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `related init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.related.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `related` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Rank the posts most related to a post
    #[command(after_help = "\
SCORING:
  score = similarity * similarity_weight
        + category_boost * category_weight
        + recency * recency_weight

  Candidates below min_similarity are dropped before scoring. Ties are broken
  by publication date (newest first), then by id.

EXAMPLES:
  related rank ems-dimagrimento
  related rank ems-dimagrimento -n 5 --json
  related rank ems-dimagrimento --posts ./content/blog --no-cache")]
    Rank(RankCommand),

    /// Show the weighted keywords extracted from a post
    Keywords(KeywordsCommand),

    /// Show effective configuration settings
    Config,

    /// Initialize related configuration in current directory
    Init(InitCommand),

    /// Validate configuration and diagnose issues
    Check,
}

impl Commands {
    /// Returns true if the command needs the merged configuration loaded up front.
    ///
    /// `init` and `check` must work when an existing config file is invalid.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Self::Init(_) | Self::Check)
    }
}
