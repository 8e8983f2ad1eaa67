//! File-backed storage for saved games and the leaderboard
//!
//! Each key lives in its own `<dir>/<key>.json`. Writes go to a temporary file
//! that is then renamed over the target, so a crash never leaves a half-written
//! save behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use blocktris_core::{Storage, StorageError};

/// Default save directory, relative to the working directory
pub const DEFAULT_SAVE_DIR: &str = ".blocktris";

/// Where saves go
///
/// `BLOCKTRIS_SAVE_DIR` overrides [`DEFAULT_SAVE_DIR`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub save_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        match std::env::var_os("BLOCKTRIS_SAVE_DIR") {
            Some(dir) if !dir.is_empty() => Self {
                save_dir: PathBuf::from(dir),
            },
            _ => Self::default(),
        }
    }

    pub fn open(&self) -> FileStorage {
        FileStorage::new(&self.save_dir)
    }
}

/// One JSON file per key under a directory
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn io_error(key: &str, source: io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Self::io_error(key, err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(key, e))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| Self::io_error(key, e))?;
        if let Err(err) = fs::rename(&tmp, &path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                warn!("could not remove {}: {cleanup}", tmp.display());
            }
            return Err(Self::io_error(key, err));
        }

        debug!("wrote {} ({} bytes)", path.display(), value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("removed {}", path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Self::io_error(key, err)),
        }
    }
}
