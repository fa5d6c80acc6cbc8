//! Response types and error handling for API endpoints
//!
//! Every failure leaves the server as `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chat_common::{AppError, ErrorResponse};
use chat_core::DomainError;
use chat_service::{dto::first_validation_message, ServiceError};
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// Message returned for any failure whose detail must stay in the logs
const INTERNAL_MESSAGE: &str = "Internal server error";

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{}", first_validation_message(.0))]
    Validation(#[from] ValidationErrors),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Service(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Domain(e) => {
                if e.is_not_found() {
                    StatusCode::NOT_FOUND
                } else if e.is_conflict() {
                    StatusCode::CONFLICT
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
            Self::Validation(_)
            | Self::InvalidPath(_)
            | Self::InvalidQuery(_)
            | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidQuery(_) => "INVALID_QUERY_PARAMETER",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::Unauthenticated => "AUTHENTICATION_REQUIRED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to clients
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Service(e) => e.public_message(),
            Self::App(e) => ErrorResponse::from(e).error,
            Self::Domain(e) if e.is_infrastructure() => INTERNAL_MESSAGE.to_string(),
            Self::Internal(_) => INTERNAL_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Create an invalid path error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create an invalid query error
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log server errors
        if status.is_server_error() {
            error!(error = ?self, code = self.error_code(), "Server error occurred");
        }

        (status, Json(ErrorResponse::new(self.public_message()))).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}
