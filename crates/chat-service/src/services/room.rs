//! Room service
//!
//! Lists and creates chat rooms.

use chat_core::entities::{ChatRoom, NewRoom, User};
use chat_core::{DomainError, RecordId};
use tracing::{error, info, instrument};
use validator::Validate;

use crate::dto::{CreateRoomRequest, RoomResponse, RoomWithCreator};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Room service
pub struct RoomService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoomService<'a> {
    /// Create a new RoomService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List every room, newest first
    ///
    /// A read failure is logged and yields an empty list.
    #[instrument(skip(self))]
    pub async fn list_rooms(&self) -> Vec<RoomResponse> {
        match self.ctx.room_repo().list_with_creator().await {
            Ok(rooms) => rooms.iter().map(RoomResponse::from).collect(),
            Err(e) => {
                error!(error = %e, "Failed to list rooms");
                Vec::new()
            }
        }
    }

    /// Create a room owned by `creator`, who becomes its first member
    #[instrument(skip(self, creator, request), fields(user_id = %creator.id))]
    pub async fn create_room(
        &self,
        creator: &User,
        request: CreateRoomRequest,
    ) -> ServiceResult<RoomResponse> {
        request.validate()?;

        let new_room = NewRoom::new(request.name.trim(), request.description, creator.id);

        let room = self
            .ctx
            .room_repo()
            .create_with_owner(&new_room)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to create room");
                ServiceError::internal("Failed to create room")
            })?;

        info!(room_id = %room.id, name = %room.name, "Room created");

        Ok(RoomResponse::from(RoomWithCreator {
            room,
            creator,
        }))
    }

    /// Fetch a room, failing with 404 if it does not exist
    #[instrument(skip(self))]
    pub async fn get_room(&self, room_id: RecordId) -> ServiceResult<ChatRoom> {
        self.ctx
            .room_repo()
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| DomainError::RoomNotFound(room_id).into())
    }
}
