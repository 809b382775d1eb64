//! Implementation of `related rank`.

use std::process::ExitCode;

use related_cache::{CacheScope, CachedRanker};
use related_rank::Ranker;
use tracing::debug;

use crate::cli::{
    args::RankCommand,
    context::{CommandContext, find_post, published_posts},
    output::output_ranking,
};

/// Ranks the posts most related to the requested one.
pub fn run(ctx: &CommandContext, cmd: &RankCommand) -> ExitCode {
    let posts_path = match ctx.posts_path(cmd.posts.path.as_deref()) {
        Ok(path) => path,
        Err(code) => return code,
    };
    let posts = match published_posts(&posts_path) {
        Ok(posts) => posts,
        Err(code) => return code,
    };
    let target = match find_post(&posts, &cmd.id) {
        Ok(target) => target,
        Err(code) => return code,
    };

    let mut settings = ctx.config.rank.clone();
    if let Some(limit) = cmd.limit {
        settings.max_results = limit;
    }
    if let Some(min_similarity) = cmd.min_similarity {
        settings.min_similarity = min_similarity;
    }
    let ranker = Ranker::from_settings(&settings, &ctx.config.extract);

    debug!(document = %target.id, use_cache = !cmd.no_cache, "ranking");

    let results = if cmd.no_cache {
        ranker.rank(target, &posts)
    } else {
        let scope = CacheScope::new(&posts_path, &settings, &ctx.config.extract);
        CachedRanker::from_settings(ranker, &ctx.config.cache, scope).related(target, &posts)
    };

    output_ranking(target, &results, cmd.json)
}
