//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer states what it needs; `chat-db` provides the
//! PostgreSQL implementation and tests provide in-memory ones.

use async_trait::async_trait;

use crate::entities::{
    ChatRoom, MessageWithAuthor, NewMessage, NewRoom, NewUser, RoomMember, RoomSummary, User,
};
use crate::error::DomainError;
use crate::value_objects::RecordId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>>;

    /// Find the user whose username OR email matches.
    ///
    /// When two different users match, the one with the lowest id wins.
    async fn find_by_identity(&self, username: &str, email: &str) -> RepoResult<Option<User>>;

    /// Create a new user, returning the stored row
    ///
    /// Fails with [`DomainError::IdentityTaken`] on a uniqueness clash.
    async fn create(&self, user: &NewUser) -> RepoResult<User>;
}

// ============================================================================
// Room Repository
// ============================================================================

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find room by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<ChatRoom>>;

    /// List every room with its creator's username, newest first
    async fn list_with_creator(&self) -> RepoResult<Vec<RoomSummary>>;

    /// Insert the room and its creator's membership atomically
    async fn create_with_owner(&self, room: &NewRoom) -> RepoResult<ChatRoom>;

    /// List membership rows for a room
    async fn members(&self, room_id: RecordId) -> RepoResult<Vec<RoomMember>>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// Default page size for message listings
pub const DEFAULT_MESSAGE_LIMIT: i64 = 50;

/// Upper bound on a single message page
pub const MAX_MESSAGE_LIMIT: i64 = 100;

/// Query parameters for fetching messages
///
/// With neither cursor the latest page is returned. `before` yields the
/// page just older than the cursor, `after` the oldest messages newer than it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageQuery {
    pub before: Option<RecordId>,
    pub after: Option<RecordId>,
    pub limit: i64,
}

impl MessageQuery {
    /// Latest page of the given size
    pub fn latest(limit: i64) -> Self {
        Self {
            before: None,
            after: None,
            limit: clamp_limit(limit),
        }
    }
}

impl Default for MessageQuery {
    fn default() -> Self {
        Self::latest(DEFAULT_MESSAGE_LIMIT)
    }
}

/// Clamp a requested page size into `1..=MAX_MESSAGE_LIMIT`
#[inline]
pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, MAX_MESSAGE_LIMIT)
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Store a message and return it joined with its author
    ///
    /// Fails with [`DomainError::RoomNotFound`] if the room does not exist.
    async fn create(&self, message: &NewMessage) -> RepoResult<MessageWithAuthor>;

    /// List messages in a room, oldest first within the returned page
    async fn find_by_room(
        &self,
        room_id: RecordId,
        query: MessageQuery,
    ) -> RepoResult<Vec<MessageWithAuthor>>;
}
