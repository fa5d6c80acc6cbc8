//! # chat-core
//!
//! Domain layer containing entities, value objects, repository traits, and room events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    avatar_url_for, is_blank, ChatRoom, Message, MessageWithAuthor, NewMessage, NewRoom, NewUser,
    RoomMember, RoomSummary, User, AVATAR_BASE_URL,
};
pub use error::DomainError;
pub use events::{MessageCreatedEvent, RoomEvent};
pub use traits::{
    clamp_limit, MessageQuery, MessageRepository, RepoResult, RoomRepository, UserRepository,
    DEFAULT_MESSAGE_LIMIT, MAX_MESSAGE_LIMIT,
};
pub use value_objects::{RecordId, RecordIdParseError};
