//! Message entity <-> model mapper

use chat_core::entities::{Message, MessageWithAuthor};
use chat_core::value_objects::RecordId;

use crate::models::MessageWithAuthorModel;

/// Convert the joined message row to MessageWithAuthor
impl From<MessageWithAuthorModel> for MessageWithAuthor {
    fn from(model: MessageWithAuthorModel) -> Self {
        MessageWithAuthor {
            message: Message {
                id: RecordId::new(model.id),
                content: model.content,
                user_id: RecordId::new(model.user_id),
                room_id: RecordId::new(model.room_id),
                created_at: model.created_at,
            },
            username: model.username,
            avatar_url: model.avatar_url,
        }
    }
}
