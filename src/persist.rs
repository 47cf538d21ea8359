//! File-backed JSON persistence shared by the save and ranking stores.
//!
//! Writes go through a temp-file-then-rename step so a crash mid-write
//! leaves either the old file or the new one, never a truncated mix.
//! Reads are failure-tolerant: anything short of a clean parse is reported
//! as `None` and the caller falls back to its default structure.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors surfaced by store flushes. Loads never return these; they
/// degrade to defaults instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization failure for {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Serialize `value` and atomically replace the file at `path`, creating
/// parent directories as needed.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, payload).map_err(|source| StoreError::Io {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(io_err)
}

/// Read and parse a JSON file. Missing files are silent; unreadable or
/// malformed files log a warning. Either way the caller gets `None`.
#[must_use]
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            log::warn!("unreadable store file {}: {err}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("malformed store file {}: {err}", path.display());
            None
        }
    }
}
