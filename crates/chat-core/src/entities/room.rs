//! Chat room entity - a named conversation scope

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Chat room entity
///
/// Any user may post in any room; `created_by` records ownership only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoom {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub created_by: RecordId,
    pub created_at: DateTime<Utc>,
}

/// Room as shown in the room list, annotated with its creator's username
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub room: ChatRoom,
    pub created_by_username: String,
}

/// Values for a room that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub name: String,
    pub description: Option<String>,
    pub created_by: RecordId,
}

impl NewRoom {
    /// Build an insertable room; blank descriptions are dropped
    pub fn new(name: impl Into<String>, description: Option<String>, created_by: RecordId) -> Self {
        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Self {
            name: name.into(),
            description,
            created_by,
        }
    }
}

/// Membership row linking a user to a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomMember {
    pub user_id: RecordId,
    pub room_id: RecordId,
}
