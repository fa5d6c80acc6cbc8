//! Chat room entity <-> model mapper

use chat_core::entities::{ChatRoom, RoomMember, RoomSummary};
use chat_core::value_objects::RecordId;

use crate::models::{ChatRoomModel, RoomMemberModel, RoomWithCreatorModel};

/// Convert ChatRoomModel to ChatRoom entity
impl From<ChatRoomModel> for ChatRoom {
    fn from(model: ChatRoomModel) -> Self {
        ChatRoom {
            id: RecordId::new(model.id),
            name: model.name,
            description: model.description,
            created_by: RecordId::new(model.created_by),
            created_at: model.created_at,
        }
    }
}

/// Convert the joined listing row to a RoomSummary
impl From<RoomWithCreatorModel> for RoomSummary {
    fn from(model: RoomWithCreatorModel) -> Self {
        RoomSummary {
            room: ChatRoom {
                id: RecordId::new(model.id),
                name: model.name,
                description: model.description,
                created_by: RecordId::new(model.created_by),
                created_at: model.created_at,
            },
            created_by_username: model.created_by_username,
        }
    }
}

impl From<RoomMemberModel> for RoomMember {
    fn from(model: RoomMemberModel) -> Self {
        RoomMember {
            user_id: RecordId::new(model.user_id),
            room_id: RecordId::new(model.room_id),
        }
    }
}
