//! Client-side views of API payloads

use chat_core::RecordId;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub email: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Room {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_by: RecordId,
    pub created_by_username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatMessage {
    pub id: RecordId,
    pub content: String,
    pub user_id: RecordId,
    pub room_id: RecordId,
    pub created_at: DateTime<Utc>,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// One page of a room's history, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct MessagePage {
    pub messages: Vec<ChatMessage>,
    pub has_more: bool,
}

// Envelopes around successful writes
#[derive(Debug, Deserialize)]
pub(crate) struct LoginEnvelope {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoomEnvelope {
    pub room: Room,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageEnvelope {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_page_decodes() {
        let json = r#"{
            "messages": [{
                "id": 3, "content": "hi", "user_id": 1, "room_id": 2,
                "created_at": "2024-01-01T00:00:00Z", "username": "alice"
            }],
            "has_more": true
        }"#;

        let page: MessagePage = serde_json::from_str(json).unwrap();
        assert!(page.has_more);
        assert_eq!(page.messages[0].id, RecordId::new(3));
        assert!(page.messages[0].avatar_url.is_none());
    }

    #[test]
    fn test_room_without_description() {
        let json = r#"{
            "id": 1, "name": "general", "created_by": 1,
            "created_by_username": "alice", "created_at": "2024-01-01T00:00:00Z"
        }"#;
        let room: Room = serde_json::from_str(json).unwrap();
        assert!(room.description.is_none());
    }
}
