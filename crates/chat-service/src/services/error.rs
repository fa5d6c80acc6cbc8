//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use chat_common::AppError;
use chat_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or repository failure
    Domain(DomainError),

    /// Application error (session, validation, etc.)
    App(AppError),

    /// No valid session accompanies the request
    Unauthenticated,

    /// Validation error
    Validation(String),

    /// Internal error; the message is safe to show to clients
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Unauthenticated => write!(f, "Authentication required"),
            Self::Validation(msg) => write!(f, "{msg}"),
            Self::Internal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::Unauthenticated => 401,
            Self::Validation(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for logs
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Unauthenticated => "AUTHENTICATION_REQUIRED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message shown to API clients
    ///
    /// Infrastructure detail never leaves the server.
    pub fn public_message(&self) -> String {
        match self {
            Self::Domain(e) if e.is_infrastructure() => "Internal server error".to_string(),
            Self::App(e) if e.is_server_error() => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(crate::dto::first_validation_message(&errors))
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::Unauthenticated => AppError::MissingAuth,
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::RecordId;

    #[test]
    fn test_unauthenticated_is_distinct_from_validation() {
        assert_eq!(ServiceError::Unauthenticated.status_code(), 401);
        assert_eq!(ServiceError::validation("Content is required").status_code(), 400);
    }

    #[test]
    fn test_domain_mapping() {
        let err = ServiceError::from(DomainError::RoomNotFound(RecordId::new(9)));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.public_message(), "Room not found: 9");

        let err = ServiceError::from(DomainError::DatabaseError("timeout".to_string()));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_internal_message_is_public() {
        let err = ServiceError::internal("Failed to create room");
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "Failed to create room");
    }

    #[test]
    fn test_convert_to_app_error() {
        let app_err: AppError = ServiceError::Unauthenticated.into();
        assert_eq!(app_err.status_code(), 401);

        let app_err: AppError = ServiceError::from(DomainError::RoomNotFound(RecordId::new(4))).into();
        assert_eq!(app_err.status_code(), 404);
        assert_eq!(app_err.error_code(), "UNKNOWN_ROOM");
    }
}
