//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chat_core::entities::{ChatRoom, MessageWithAuthor, RoomSummary, User};

use super::responses::{MessageResponse, RoomResponse, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            avatar_url: user.avatar(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Room Mappers
// ============================================================================

impl From<&RoomSummary> for RoomResponse {
    fn from(summary: &RoomSummary) -> Self {
        Self {
            id: summary.room.id,
            name: summary.room.name.clone(),
            description: summary.room.description.clone(),
            created_by: summary.room.created_by,
            created_by_username: summary.created_by_username.clone(),
            created_at: summary.room.created_at,
        }
    }
}

/// A freshly created room paired with the user who created it
pub struct RoomWithCreator<'a> {
    pub room: ChatRoom,
    pub creator: &'a User,
}

impl From<RoomWithCreator<'_>> for RoomResponse {
    fn from(value: RoomWithCreator<'_>) -> Self {
        Self {
            id: value.room.id,
            name: value.room.name,
            description: value.room.description,
            created_by: value.room.created_by,
            created_by_username: value.creator.username.clone(),
            created_at: value.room.created_at,
        }
    }
}

// ============================================================================
// Message Mappers
// ============================================================================

impl From<&MessageWithAuthor> for MessageResponse {
    fn from(m: &MessageWithAuthor) -> Self {
        Self {
            id: m.message.id,
            content: m.message.content.clone(),
            user_id: m.message.user_id,
            room_id: m.message.room_id,
            created_at: m.message.created_at,
            username: m.username.clone(),
            avatar_url: m.avatar_url.clone(),
        }
    }
}

impl From<MessageWithAuthor> for MessageResponse {
    fn from(m: MessageWithAuthor) -> Self {
        Self::from(&m)
    }
}
