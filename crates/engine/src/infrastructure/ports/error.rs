//! Store errors shared by every repository port.

/// Failure of a single repository call.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// A write addressed a node that is not in the store.
    #[error("{label} not found: {id}")]
    NotFound { label: &'static str, id: String },

    /// The driver or the store failed.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// A stored row could not be read back into the domain model.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Another node of the same label already holds the (name, differentiator) key.
    #[error("Key taken: {0}")]
    KeyTaken(String),
}

impl RepoError {
    pub fn not_found(label: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            label,
            id: id.to_string(),
        }
    }

    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    pub fn decode(message: impl ToString) -> Self {
        Self::Decode(message.to_string())
    }

    pub fn key_taken(message: impl ToString) -> Self {
        Self::KeyTaken(message.to_string())
    }

    /// Lost a race for a key; callers re-read and report a conflict.
    pub fn is_key_taken(&self) -> bool {
        matches!(self, Self::KeyTaken(_))
    }
}
