//! Failures while reading posts from disk.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Why a post or post dump could not be loaded.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Reading the file failed.
    #[error("cannot read {path}: {source}")]
    ReadFile {
        /// Post or dump file.
        path: PathBuf,
        /// I/O failure.
        source: io::Error,
    },

    /// The `---` block is present but is not valid YAML for a post.
    #[error("bad frontmatter in {path}: {source}")]
    Frontmatter {
        /// Post file.
        path: PathBuf,
        /// YAML failure.
        source: serde_yaml::Error,
    },

    /// The file does not open with a `---` block.
    #[error("{path} has no frontmatter")]
    MissingFrontmatter {
        /// Post file.
        path: PathBuf,
    },

    /// A `.json` dump is not an array of posts.
    #[error("bad post dump {path}: {source}")]
    Json {
        /// Dump file.
        path: PathBuf,
        /// JSON failure.
        source: serde_json::Error,
    },

    /// Walking a posts directory failed.
    #[error("cannot walk {path}: {source}")]
    Walk {
        /// Posts directory.
        path: PathBuf,
        /// Walk failure.
        source: walkdir::Error,
    },

    /// Neither Markdown nor JSON.
    #[error("{path} is neither a Markdown post nor a JSON dump")]
    UnsupportedFileType {
        /// Rejected file.
        path: PathBuf,
    },
}
