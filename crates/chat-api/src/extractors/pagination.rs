//! Pagination extractor
//!
//! Extracts cursor-based pagination parameters from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use chat_core::traits::{clamp_limit, MessageQuery, DEFAULT_MESSAGE_LIMIT};
use chat_core::RecordId;
use serde::Deserialize;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    /// Get items before this ID
    #[serde(default)]
    pub before: Option<String>,
    /// Get items after this ID
    #[serde(default)]
    pub after: Option<String>,
    /// Maximum number of items to return
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Validated pagination parameters
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub before: Option<RecordId>,
    pub after: Option<RecordId>,
    /// Page size, clamped to 1-100
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            before: None,
            after: None,
            limit: DEFAULT_MESSAGE_LIMIT,
        }
    }
}

impl Pagination {
    /// Convert into a repository query
    pub fn into_query(self) -> MessageQuery {
        MessageQuery {
            before: self.before,
            after: self.after,
            limit: self.limit,
        }
    }
}

fn parse_cursor(value: Option<String>, name: &str) -> Result<Option<RecordId>, ApiError> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            RecordId::parse(&s)
                .map_err(|_| ApiError::invalid_query(format!("Invalid '{name}' cursor format")))
        })
        .transpose()
}

impl TryFrom<PaginationParams> for Pagination {
    type Error = ApiError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        Ok(Pagination {
            before: parse_cursor(params.before, "before")?,
            after: parse_cursor(params.after, "after")?,
            limit: clamp_limit(params.limit.unwrap_or(DEFAULT_MESSAGE_LIMIT)),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Pagination::try_from(params)
    }
}
