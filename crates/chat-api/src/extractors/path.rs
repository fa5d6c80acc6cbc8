//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use chat_core::RecordId;
use serde::Deserialize;

use crate::response::ApiError;

#[derive(Debug, Deserialize)]
struct RoomIdParams {
    room_id: String,
}

/// `room_id` path parameter parsed as a [`RecordId`]
#[derive(Debug, Clone, Copy)]
pub struct RoomIdPath(pub RecordId);

#[async_trait]
impl<S> FromRequestParts<S> for RoomIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<RoomIdParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        RecordId::parse(&params.room_id)
            .map(RoomIdPath)
            .map_err(|_| ApiError::invalid_path("Invalid room_id format"))
    }
}
