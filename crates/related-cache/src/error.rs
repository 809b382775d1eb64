//! Error types for session stores.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors a session store can report.
///
/// The ranking cache never surfaces these to its callers; they are logged and the freshly
/// computed result is returned instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a cache file failed.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Storing the value would exceed the store's capacity.
    #[error("cache quota exceeded: {needed} bytes needed, {available} available")]
    QuotaExceeded {
        /// Bytes the write would occupy.
        needed: usize,
        /// Bytes still free.
        available: usize,
    },

    /// A cache entry could not be serialized.
    #[error("failed to serialize cache entry: {0}")]
    Serialize(#[source] serde_json::Error),

    /// No platform cache directory could be determined.
    #[error("could not determine a cache directory")]
    NoCacheDirectory,
}
