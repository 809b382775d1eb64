//! Implementation of `related check`.

use std::{path::Path, process::ExitCode};

use related_config::{Config, ConfigWarning, discover_config_files, is_global_config};
use related_document::{load_dir, published};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, success, warning},
};

/// Exit codes for `related check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration is valid with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Configuration has warnings but is usable.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
    /// Configuration has errors and cannot be used.
    pub const ERROR: ExitCode = ExitCode::FAILURE;
}

/// Lists configuration files, checks the post collection and reports warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("Checking configuration...");
    println!();

    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!("Run {} to create a configuration file.", subheader("related init"));
        return exit_codes::OK;
    }

    println!("{}", subheader("Config files:"));
    for path in &config_files {
        let scope = if is_global_config(path) {
            "global"
        } else {
            "local"
        };
        println!("   {} {}", path.display(), dim(&format!("({scope})")));
    }
    println!();

    let config = match Config::load(&ctx.cwd) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return exit_codes::ERROR;
        }
    };

    println!("{}", subheader("Posts:"));
    match &config.posts.path {
        Some(path) => println!("   {}", describe_posts(path)),
        None => println!("   {}", dim("(none configured)")),
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("{}", success("No issues found."));
        return exit_codes::OK;
    }

    println!("{}", warning(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("  - {w}");
    }
    println!();

    print_hints(&warnings);

    exit_codes::WARNINGS
}

/// One-line status of the posts directory: its path and how many posts it publishes.
fn describe_posts(path: &Path) -> String {
    if !path.is_dir() {
        return format!("{} {}", path.display(), warning("[missing]"));
    }
    match load_dir(path) {
        Ok(documents) => {
            let total = documents.len();
            let live = published(documents).len();
            format!(
                "{} {}",
                path.display(),
                dim(&format!("({live} published of {total})"))
            )
        }
        Err(e) => format!("{} {}", path.display(), warning(&format!("[unreadable: {e}]"))),
    }
}

/// Hint for resolving a warning.
fn hint(config_warning: &ConfigWarning) -> &'static str {
    match config_warning {
        ConfigWarning::NoPostsPath => "Set [posts] path to the directory holding your posts.",
        ConfigWarning::PostsPathMissing { .. } => {
            "Create the posts directory or update [posts] path."
        }
        ConfigWarning::PostsPathNotDirectory { .. } => {
            "[posts] path must point to a directory, not a file."
        }
        ConfigWarning::MinSimilarityOutOfRange { .. } => {
            "Cosine similarity lies in 0.0-1.0; pick min_similarity in that range."
        }
        ConfigWarning::NonPositiveWeight { .. } => {
            "Use positive weights; remove a component by lowering its weight instead."
        }
        ConfigWarning::BoostsOutweighSimilarity { .. } => {
            "Lower category_weight or recency_weight so content similarity dominates."
        }
        ConfigWarning::NonPositiveHalfLife { .. } => {
            "Set recency_half_life_days to a positive number of days."
        }
        ConfigWarning::ZeroMaxResults => "Set rank.max_results to at least 1.",
        ConfigWarning::WordLengthRangeEmpty { .. } => {
            "Make extract.min_word_length no greater than extract.max_word_length."
        }
    }
}

/// Prints hints for resolving the warnings, once each.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings.iter().map(hint).collect();
    hints.sort_unstable();
    hints.dedup();

    println!("{}", subheader("Hints:"));
    for h in hints {
        println!("  {}", dim(h));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_warnings_share_a_hint() {
        let warnings = [
            ConfigWarning::NonPositiveWeight {
                name: "category_weight",
                value: 0.0,
            },
            ConfigWarning::NonPositiveWeight {
                name: "recency_weight",
                value: -1.0,
            },
        ];
        assert_eq!(hint(&warnings[0]), hint(&warnings[1]));
    }
}
