//! Error types for the store.

use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// Callers above the store treat these as opaque: an operation either succeeded or failed.
/// The variants exist so the failure can be logged and reported with a useful message.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested row does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A unique or foreign-key constraint rejected the write.
    #[error("{0}")]
    Constraint(String),

    /// The record failed validation before reaching the database.
    #[error("{0}")]
    Validation(String),

    /// The password could not be hashed.
    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    /// An underlying database error occurred.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// The schema could not be brought up to date.
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// Classifies a driver error for the given entity.
    pub(crate) fn from_sqlx(err: sqlx::Error, entity: &'static str) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() || db.is_foreign_key_violation() {
                return StoreError::Constraint(db.message().to_string());
            }
        }
        if matches!(err, sqlx::Error::RowNotFound) {
            return StoreError::NotFound(entity);
        }
        StoreError::Database(err)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}
