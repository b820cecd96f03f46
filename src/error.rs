//! Directory error model.

use thiserror::Error;

/// Result type used by the registry and the console.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Operator-facing failure. Neither kind ends the console session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// No user carries the given identifier.
    #[error("User {0} not found.")]
    NotFound(String),

    /// A field could not be coerced to its type (e.g. non-numeric age).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DirectoryError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
