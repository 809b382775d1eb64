//! String-keyed, string-valued session stores.
//!
//! A store is the persistence behind the ranking cache. It knows nothing about TTLs or
//! rankings; values are opaque text. Three backends are provided:
//!
//! - [`MemoryStore`]: a mutex-protected map with a byte quota, lives as long as the process
//! - [`FileStore`]: one file per key in a directory, survives between CLI invocations
//! - [`NullStore`]: stores nothing, so every lookup recomputes

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use directories::BaseDirs;

use crate::StoreError;

/// Default capacity of a [`MemoryStore`], in bytes.
pub const DEFAULT_QUOTA: usize = 5 * 1024 * 1024;

/// Name of the cache subdirectory under the platform cache directory.
const CACHE_DIR_NAME: &str = "related";

/// Extension of [`FileStore`] entry files.
const ENTRY_EXTENSION: &str = "json";

/// A string-keyed, string-valued store.
///
/// Implementations must be safe to share between threads.
pub trait SessionStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the value stored under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store with a total size limit.
///
/// Size is counted as the bytes of every key plus its value.
#[derive(Debug)]
pub struct MemoryStore {
    /// Stored entries.
    entries: Mutex<HashMap<String, String>>,
    /// Maximum total size in bytes.
    quota: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_quota(DEFAULT_QUOTA)
    }
}

impl MemoryStore {
    /// Creates an empty store with the default quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store holding at most `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota,
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Locks the map, recovering from a poisoned lock.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.lock();
        let used: usize = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        let needed = key.len() + value.len();
        let available = self.quota.saturating_sub(used);
        if needed > available {
            return Err(StoreError::QuotaExceeded { needed, available });
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock().remove(key);
        Ok(())
    }
}

/// Store keeping one file per key in a directory.
///
/// Keys are escaped into file names, so any string is a valid key. Writes go to a temporary
/// file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory holding the entry files.
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store in `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates a store in the platform cache directory (`~/.cache/related` on Linux).
    pub fn in_default_dir() -> Result<Self, StoreError> {
        default_cache_dir().map(Self::new)
    }

    /// Directory holding the entry files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{ENTRY_EXTENSION}", escape_key(key)))
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.entry_path(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

/// Store that keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl SessionStore for NullStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Returns the platform cache directory for `related`.
pub fn default_cache_dir() -> Result<PathBuf, StoreError> {
    BaseDirs::new()
        .map(|dirs| dirs.cache_dir().join(CACHE_DIR_NAME))
        .ok_or(StoreError::NoCacheDirectory)
}

/// Escapes a key into a file name: ASCII alphanumerics, `-` and `_` pass through, every
/// other byte becomes `%XX`.
fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
