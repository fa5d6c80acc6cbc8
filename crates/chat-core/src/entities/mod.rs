//! Domain entities - core business objects

mod message;
mod room;
mod user;

pub use message::{is_blank, Message, MessageWithAuthor, NewMessage};
pub use room::{ChatRoom, NewRoom, RoomMember, RoomSummary};
pub use user::{avatar_url_for, NewUser, User, AVATAR_BASE_URL};
