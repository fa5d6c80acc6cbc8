//! Error handling utilities for repositories

use chat_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Check for a foreign key violation; the callback receives the violated constraint name
pub fn map_foreign_key_violation<F>(e: SqlxError, on_fk: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_fk(db_err.constraint());
        }
    }
    DomainError::DatabaseError(e.to_string())
}
