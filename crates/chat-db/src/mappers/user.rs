//! User entity <-> model mapper

use chat_core::entities::User;
use chat_core::value_objects::RecordId;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: RecordId::new(model.id),
            username: model.username,
            email: model.email,
            avatar_url: model.avatar_url,
            created_at: model.created_at,
        }
    }
}
