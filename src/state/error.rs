//! State management-specific error types.

use crate::store::{MAX_DIFFICULTY, MIN_DIFFICULTY};

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Quest title missing on the creation form
    #[error("Quest title cannot be empty")]
    EmptyTitle,

    /// Difficulty outside the allowed range
    #[error("Difficulty must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}, got {0}")]
    DifficultyOutOfRange(u8),

    /// Quest not found in local state
    #[error("Quest not found: {id}")]
    QuestNotFound { id: uuid::Uuid },
}
