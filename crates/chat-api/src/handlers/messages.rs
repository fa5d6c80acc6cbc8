//! Message handlers
//!
//! Endpoints for message operations.

use axum::{extract::State, Json};
use chat_service::{MessagePage, MessageService, SendMessageRequest, SendMessageResponse};

use crate::extractors::{CurrentUser, Pagination, RoomIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Get one page of a room's messages, oldest first
///
/// GET /rooms/{room_id}/messages
pub async fn get_messages(
    State(state): State<AppState>,
    RoomIdPath(room_id): RoomIdPath,
    pagination: Pagination,
) -> Json<MessagePage> {
    let service = MessageService::new(state.service_context());
    Json(service.list_messages(room_id, pagination.into_query()).await)
}

/// Send a message to a room
///
/// POST /rooms/{room_id}/messages
pub async fn create_message(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    RoomIdPath(room_id): RoomIdPath,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<SendMessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let message = service.send_message(&user, room_id, request).await?;
    Ok(Created(Json(SendMessageResponse::new(message))))
}
