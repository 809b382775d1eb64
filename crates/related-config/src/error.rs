//! Errors raised while loading `.related.toml` files.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::{de, ser};

/// A configuration file could not be turned into settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but reading it failed.
    #[error("cannot read {path}: {source}")]
    ReadFile {
        /// Offending file.
        path: PathBuf,
        /// I/O failure.
        source: io::Error,
    },

    /// The file is not valid TOML or has a field of the wrong type.
    #[error("invalid settings in {path}: {source}")]
    ParseToml {
        /// Offending file.
        path: PathBuf,
        /// Decoder failure, with line and column.
        source: de::Error,
    },

    /// Rendering the effective settings back to TOML failed.
    #[error("cannot render settings as TOML: {0}")]
    SerializeToml(#[source] ser::Error),

    /// A `~` path was configured but there is no home directory to expand it against.
    #[error("no home directory to expand `~` against")]
    NoHomeDirectory,
}
