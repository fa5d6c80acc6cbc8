//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::RecordId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(RecordId),

    #[error("Room not found: {0}")]
    RoomNotFound(RecordId),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username or email already in use")]
    IdentityTaken,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::RoomNotFound(_) => "UNKNOWN_ROOM",
            Self::IdentityTaken => "IDENTITY_TAKEN",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::RoomNotFound(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::IdentityTaken)
    }

    /// Check if this error comes from the storage layer
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::DatabaseError(_))
    }
}
