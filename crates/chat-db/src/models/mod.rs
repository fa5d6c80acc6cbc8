//! Database models - SQLx-compatible structs for PostgreSQL tables

mod message;
mod room;
mod user;

pub use message::MessageWithAuthorModel;
pub use room::{ChatRoomModel, RoomMemberModel, RoomWithCreatorModel};
pub use user::UserModel;
