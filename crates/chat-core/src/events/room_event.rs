//! Room events - pushed to subscribers of a room when its state changes
//!
//! Events are serialized as `{"type": "...", "data": {...}}` on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::MessageWithAuthor;
use crate::value_objects::RecordId;

/// All events a room subscriber can receive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum RoomEvent {
    /// A new message was stored in the room
    MessageCreated(MessageCreatedEvent),

    /// The subscriber fell behind and must refetch the message list
    Resync,
}

impl RoomEvent {
    /// Room this event belongs to, if it carries one
    pub fn room_id(&self) -> Option<RecordId> {
        match self {
            Self::MessageCreated(e) => Some(e.room_id),
            Self::Resync => None,
        }
    }

    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MessageCreated(_) => "message_created",
            Self::Resync => "resync",
        }
    }
}

/// Payload of [`RoomEvent::MessageCreated`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCreatedEvent {
    pub id: RecordId,
    pub content: String,
    pub user_id: RecordId,
    pub room_id: RecordId,
    pub created_at: DateTime<Utc>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl From<&MessageWithAuthor> for MessageCreatedEvent {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Message;

    fn sample() -> MessageWithAuthor {
        MessageWithAuthor {
            message: Message {
                id: RecordId::new(3),
                content: "hi".to_string(),
                user_id: RecordId::new(1),
                room_id: RecordId::new(2),
                created_at: Utc::now(),
            },
            username: "alice".to_string(),
            avatar_url: None,
        }
    }

    #[test]
    fn test_message_created_wire_format() {
        let event = RoomEvent::MessageCreated(MessageCreatedEvent::from(&sample()));
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "message_created");
        assert_eq!(json["data"]["content"], "hi");
        assert_eq!(json["data"]["room_id"], 2);
        assert!(json["data"].get("avatar_url").is_none());
    }

    #[test]
    fn test_resync_wire_format() {
        let json = serde_json::to_string(&RoomEvent::Resync).unwrap();
        assert_eq!(json, r#"{"type":"resync"}"#);

        let back: RoomEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RoomEvent::Resync);
    }

    #[test]
    fn test_room_id() {
        let event = RoomEvent::MessageCreated(MessageCreatedEvent::from(&sample()));
        assert_eq!(event.room_id(), Some(RecordId::new(2)));
        assert_eq!(event.event_type(), "message_created");
        assert_eq!(RoomEvent::Resync.room_id(), None);
    }
}
