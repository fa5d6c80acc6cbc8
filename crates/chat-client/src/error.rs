//! Client error types

use thiserror::Error;

/// Errors returned by [`crate::ChatClient`]
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure talking to the HTTP API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status and an `{"error"}` body
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server rejected the call for lack of a session
    pub fn is_unauthenticated(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
