/// Core error types for Warden
use thiserror::Error;

use crate::types::UniqueField;

/// Result type alias using `WardenError`
pub type Result<T> = std::result::Result<T, WardenError>;

/// Core error type shared by every store implementation
#[derive(Error, Debug)]
pub enum WardenError {
    /// A write would break the username or email uniqueness invariant
    #[error("Duplicate {0}")]
    Duplicate(UniqueField),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl WardenError {
    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Returns the violated field when this is a uniqueness failure
    pub fn duplicate_field(&self) -> Option<UniqueField> {
        match self {
            Self::Duplicate(field) => Some(*field),
            _ => None,
        }
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for WardenError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
