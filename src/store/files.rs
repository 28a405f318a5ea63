//! Low-level JSON file access for the store.
//!
//! Records live as pretty-printed JSON documents in the data directory;
//! a missing file reads as an absent record rather than an error.

use super::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

/// Read and parse a JSON document, returning `None` when the file does
/// not exist yet.
///
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).await.map_err(|e| StoreError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let value = serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Some(value))
}

/// Serialize a value and write it to disk, creating the parent directory
/// if needed.
///
pub(crate) async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await.map_err(|e| StoreError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }
    let contents = serde_json::to_string_pretty(value).map_err(StoreError::Serialize)?;
    fs::write(path, contents).await.map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
