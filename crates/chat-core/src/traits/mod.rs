//! Repository traits

mod repositories;

pub use repositories::{
    clamp_limit, MessageQuery, MessageRepository, RepoResult, RoomRepository, UserRepository,
    DEFAULT_MESSAGE_LIMIT, MAX_MESSAGE_LIMIT,
};
