//! Service-level error taxonomy.

use stockroom_core::DomainError;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Validation, not-found and conflict failures.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// A stored row could not be turned back into a domain value.
    #[error("malformed row: {0}")]
    Decode(String),
}

impl ServiceError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        // Constraint violations that slipped past the application checks
        // (concurrent writers) still surface as conflicts.
        if let Some(db) = err.as_database_error() {
            if db.is_unique_violation() {
                return Self::Domain(DomainError::conflict(format!(
                    "record already exists: {}",
                    db.message()
                )));
            }
            if db.is_foreign_key_violation() {
                return Self::Domain(DomainError::conflict(format!(
                    "referenced record changed concurrently: {}",
                    db.message()
                )));
            }
        }
        Self::Database(err)
    }
}
