//! Chat room database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for chat_rooms table
#[derive(Debug, Clone, FromRow)]
pub struct ChatRoomModel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// Room row joined with its creator's username
#[derive(Debug, Clone, FromRow)]
pub struct RoomWithCreatorModel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub created_by_username: String,
}

/// Database model for room_members table
#[derive(Debug, Clone, FromRow)]
pub struct RoomMemberModel {
    pub user_id: i64,
    pub room_id: i64,
    pub joined_at: DateTime<Utc>,
}
