//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in chat-core.

mod error;
mod message;
mod room;
mod user;

pub use message::PgMessageRepository;
pub use room::PgRoomRepository;
pub use user::PgUserRepository;
