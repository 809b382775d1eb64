//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use related_config::Config;
use related_document::{Document, load_dir, load_path, published};
use tracing::debug;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for commands like `init` or `check` that should work even when an existing
    /// config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Resolves the post collection: the `--posts` override relative to the working
    /// directory, else `posts.path` from configuration.
    pub fn posts_path(&self, override_path: Option<&Path>) -> Result<PathBuf, ExitCode> {
        if let Some(path) = override_path {
            return Ok(self.cwd.join(path));
        }
        match &self.config.posts.path {
            Some(path) => Ok(path.clone()),
            None => {
                eprintln!("error: no posts directory configured");
                eprintln!("Run 'related init' and set [posts] path, or pass --posts <DIR>.");
                Err(ExitCode::FAILURE)
            }
        }
    }
}

/// Loads the published posts at `path`, a directory of posts or a single file.
pub fn published_posts(path: &Path) -> Result<Vec<Document>, ExitCode> {
    if !path.exists() {
        eprintln!("error: posts path does not exist: {}", path.display());
        return Err(ExitCode::FAILURE);
    }

    let loaded = if path.is_dir() {
        load_dir(path)
    } else {
        load_path(path)
    };
    let documents = loaded.map_err(|e| {
        eprintln!("error: failed to load posts: {e}");
        ExitCode::FAILURE
    })?;
    let total = documents.len();
    let posts = published(documents);
    debug!(path = %path.display(), total, published = posts.len(), "loaded posts");
    Ok(posts)
}

/// Finds the post whose id, or failing that whose slug, is `key`.
pub fn find_post<'a>(posts: &'a [Document], key: &str) -> Result<&'a Document, ExitCode> {
    posts
        .iter()
        .find(|p| p.id == key)
        .or_else(|| posts.iter().find(|p| p.slug == key))
        .ok_or_else(|| {
            eprintln!("error: no published post with id or slug '{key}'");
            ExitCode::FAILURE
        })
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
