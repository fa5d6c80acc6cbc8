//! Room handlers
//!
//! Endpoints for listing and creating rooms.

use axum::{extract::State, Json};
use chat_service::{CreateRoomRequest, CreateRoomResponse, RoomResponse, RoomService};

use crate::extractors::{CurrentUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List all rooms, newest first
///
/// GET /rooms
pub async fn list_rooms(State(state): State<AppState>) -> Json<Vec<RoomResponse>> {
    let service = RoomService::new(state.service_context());
    Json(service.list_rooms().await)
}

/// Create a room; the creator becomes its first member
///
/// POST /rooms
pub async fn create_room(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateRoomRequest>,
) -> ApiResult<Created<Json<CreateRoomResponse>>> {
    let service = RoomService::new(state.service_context());
    let room = service.create_room(&user, request).await?;
    Ok(Created(Json(CreateRoomResponse::new(room))))
}
