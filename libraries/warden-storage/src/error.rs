/// Storage-specific errors
use thiserror::Error;
use warden_core::{UniqueField, WardenError};

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Unique index rejected the write
    #[error("Duplicate {0}")]
    Duplicate(UniqueField),

    /// A stored column could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Migration error
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match unique_violation(&err) {
            Some(field) => Self::Duplicate(field),
            None => Self::Database(err),
        }
    }
}

/// Classify a `UNIQUE constraint failed: users.<column>` error
fn unique_violation(err: &sqlx::Error) -> Option<UniqueField> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    if !db_err.is_unique_violation() {
        return None;
    }

    let message = db_err.message();
    if message.contains("users.username") {
        Some(UniqueField::Username)
    } else if message.contains("users.email") {
        Some(UniqueField::Email)
    } else {
        None
    }
}

impl From<StorageError> for WardenError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate(field) => WardenError::Duplicate(field),
            StorageError::Serialization(e) => WardenError::Serialization(e),
            other => WardenError::database(other.to_string()),
        }
    }
}
