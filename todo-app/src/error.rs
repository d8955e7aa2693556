//! Error types for todo operations

use crate::model::TodoId;
use thiserror::Error;
use todo_app_common::{ErrorSeverity, Severity};

/// Result type for todo operations
pub type Result<T> = std::result::Result<T, TodoError>;

/// Errors that can occur during todo operations
///
/// A missing id is usually NOT an error: `get`, `toggle` and `set_status`
/// report it as `Ok(None)` and `delete` ignores it. Only `update` treats an
/// unknown id as [`TodoError::Conflict`], because the caller asserted it exists.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Title empty or whitespace-only after trimming
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// `add` was handed an item that already carries an id
    #[error("Todo item already has id {0}; new items must not carry an id")]
    IdAlreadyAssigned(TodoId),

    /// `update` was handed an item that was never persisted
    #[error("Todo item has no id; only persisted items can be updated")]
    MissingId,

    /// `update` targeted an id the store does not know
    #[error("Todo item {id} not found; it may have been deleted")]
    Conflict {
        /// Id the caller expected to exist
        id: TodoId,
    },

    /// Status text that is neither PENDING nor DONE
    #[error("Invalid status: '{0}'")]
    InvalidStatus(String),

    /// Priority text that is not LOW, MEDIUM or HIGH
    #[error("Invalid priority: '{0}'")]
    InvalidPriority(String),

    /// A stored record could not be mapped back to a [`crate::TodoItem`]
    #[error("Corrupt record for todo item {id}: {reason}")]
    CorruptRecord {
        /// Row id of the record
        id: i64,
        /// What was wrong with it
        reason: String,
    },

    /// Failure inside the storage adapter
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TodoError {
    /// Wrap an adapter-specific error
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Box::new(err))
    }

    /// True when the item vanished between lookup and write
    pub fn is_conflict(&self) -> bool {
        matches!(self, TodoError::Conflict { .. })
    }
}

impl Severity for TodoError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning: rejected input, nothing was touched
            TodoError::EmptyTitle => ErrorSeverity::Warning,
            TodoError::InvalidStatus(_) => ErrorSeverity::Warning,
            TodoError::InvalidPriority(_) => ErrorSeverity::Warning,

            // Error: contract violations by the caller
            TodoError::IdAlreadyAssigned(_) => ErrorSeverity::Error,
            TodoError::MissingId => ErrorSeverity::Error,
            TodoError::Conflict { .. } => ErrorSeverity::Error,

            // Critical: the store is broken
            TodoError::CorruptRecord { .. } => ErrorSeverity::Critical,
            TodoError::Storage(_) => ErrorSeverity::Critical,
        }
    }
}
