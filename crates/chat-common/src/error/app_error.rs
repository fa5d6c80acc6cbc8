//! Application error types
//!
//! Unified error handling for the entire application.

use chat_core::DomainError;
use serde::Serialize;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Authentication required")]
    MissingAuth,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) => 400,

            // 401 Unauthorized
            Self::InvalidToken | Self::TokenExpired | Self::MissingAuth => 401,

            // 500 Internal Server Error
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => 500,

            // Map domain errors to appropriate status codes
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
        }
    }

    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MissingAuth => "MISSING_AUTH",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        let status = self.status_code();
        (400..500).contains(&status)
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        let status = self.status_code();
        (500..600).contains(&status)
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Error body returned to API clients: `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        // Server-side detail stays in the logs
        if err.is_server_error() {
            Self::new("Internal server error")
        } else {
            Self::new(err.to_string())
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
