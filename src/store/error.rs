//! Store-specific error types.

use std::path::PathBuf;
use uuid::Uuid;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to read a store file
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a store file
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse a store file
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to serialize a store record
    #[error("Failed to serialize store record: {0}")]
    Serialize(serde_json::Error),

    /// Quest not found in the store
    #[error("Quest not found: {id}")]
    QuestNotFound { id: Uuid },

    /// Sub-task not found on the quest
    #[error("Sub-task not found: {id}")]
    TaskNotFound { id: Uuid },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let id = Uuid::new_v4();
        let error = StoreError::QuestNotFound { id };
        assert!(error.to_string().contains("Quest not found"));
        assert!(error.to_string().contains(&id.to_string()));

        let error = StoreError::TaskNotFound { id };
        assert!(error.to_string().contains("Sub-task not found"));
    }

    #[test]
    fn test_store_error_with_path() {
        let path = PathBuf::from("/test/quests.json");
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "Not found");
        let error = StoreError::Read {
            path: path.clone(),
            source: io_error,
        };
        assert!(error.to_string().contains("/test/quests.json"));
    }
}
