//! A throwaway site tree for related-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// Temporary site: directories, post files and `.related.toml` files under one root.
pub struct SiteFixture {
    /// Owned temporary directory, removed on drop.
    root: TempDir,
}

impl SiteFixture {
    /// Creates an empty site.
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    /// Root of the site.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Absolute path of `rel` inside the site, created as a directory.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let dir = self.path().join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Writes an empty JSON post dump at `rel`.
    pub fn dump(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "[]").unwrap();
        path
    }

    /// Writes `.related.toml` into the directory `rel` with `content`.
    pub fn config(&self, rel: &str, content: &str) -> PathBuf {
        let file = self.dir(rel).join(CONFIG_FILENAME);
        fs::write(&file, content).unwrap();
        file
    }

    /// Writes a config that stops discovery.
    pub fn root_config(&self, rel: &str) -> PathBuf {
        self.config(rel, "root = true\n")
    }
}
