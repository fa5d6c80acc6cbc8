//! In-memory repositories for tests
//!
//! Compiled for this crate's tests and for dependents enabling the
//! `test-util` feature.
//!
//! Mirrors the PostgreSQL semantics the services depend on: unique
//! identities, lowest-id matching, atomic room creation and
//! `(created_at, id)` cursor paging.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chat_common::SessionTokens;
use chat_core::entities::{
    ChatRoom, Message, MessageWithAuthor, NewMessage, NewRoom, NewUser, RoomMember, RoomSummary,
    User,
};
use chat_core::traits::{
    MessageQuery, MessageRepository, RepoResult, RoomRepository, UserRepository,
};
use chat_core::{DomainError, RecordId};
use chrono::{DateTime, TimeZone, Utc};

use crate::realtime::RoomHub;

use super::context::{ServiceContext, ServiceContextBuilder};

pub const TEST_SECRET: &str = "test-secret-for-session-signing";

#[derive(Default)]
struct State {
    users: Vec<User>,
    rooms: Vec<ChatRoom>,
    members: Vec<RoomMember>,
    messages: Vec<Message>,
    next_id: i64,
}

impl State {
    fn next(&mut self) -> (RecordId, DateTime<Utc>) {
        self.next_id += 1;
        let at = Utc
            .timestamp_opt(1_700_000_000 + self.next_id, 0)
            .single()
            .unwrap_or_else(Utc::now);
        (RecordId::new(self.next_id), at)
    }

    fn insert_user(&mut self, new_user: &NewUser) -> RepoResult<User> {
        if self
            .users
            .iter()
            .any(|u| u.username == new_user.username || u.email == new_user.email)
        {
            return Err(DomainError::IdentityTaken);
        }

        let (id, created_at) = self.next();
        let user = User {
            id,
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            avatar_url: Some(new_user.avatar_url.clone()),
            created_at,
        };
        self.users.push(user.clone());
        Ok(user)
    }

    fn with_author(&self, message: &Message) -> Option<MessageWithAuthor> {
        let author = self.users.iter().find(|u| u.id == message.user_id)?;
        Some(MessageWithAuthor {
            message: message.clone(),
            username: author.username.clone(),
            avatar_url: author.avatar_url.clone(),
        })
    }
}

/// Shared in-memory store implementing every repository trait
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    pending_user: Mutex<Option<NewUser>>,
}

impl InMemoryStore {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_read(&self) -> RepoResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection refused".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> RepoResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection refused".to_string()));
        }
        Ok(())
    }

    /// Seed a user directly
    pub fn insert_user(&self, username: &str, email: &str) -> User {
        self.state()
            .insert_user(&NewUser::new(username, email))
            .expect("seeded user must be unique")
    }

    pub fn user_count(&self) -> usize {
        self.state().users.len()
    }

    pub fn room_count(&self) -> usize {
        self.state().rooms.len()
    }

    /// Number of write attempts made through the repository traits
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make the next user insert lose a race against `user`
    pub fn race_next_user_insert(&self, user: NewUser) {
        *self.pending_user.lock().unwrap_or_else(|e| e.into_inner()) = Some(user);
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>> {
        self.check_read()?;
        Ok(self.state().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_identity(&self, username: &str, email: &str) -> RepoResult<Option<User>> {
        self.check_read()?;
        Ok(self
            .state()
            .users
            .iter()
            .filter(|u| u.matches_identity(username, email))
            .min_by_key(|u| u.id)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        self.check_write()?;
        let pending = self
            .pending_user
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        let mut state = self.state();
        if let Some(winner) = pending {
            state.insert_user(&winner)?;
        }
        state.insert_user(user)
    }
}

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<ChatRoom>> {
        self.check_read()?;
        Ok(self.state().rooms.iter().find(|r| r.id == id).cloned())
    }

    async fn list_with_creator(&self) -> RepoResult<Vec<RoomSummary>> {
        self.check_read()?;
        let state = self.state();
        let mut rooms: Vec<RoomSummary> = state
            .rooms
            .iter()
            .filter_map(|room| {
                let creator = state.users.iter().find(|u| u.id == room.created_by)?;
                Some(RoomSummary {
                    room: room.clone(),
                    created_by_username: creator.username.clone(),
                })
            })
            .collect();
        rooms.sort_by_key(|s| std::cmp::Reverse((s.room.created_at, s.room.id)));
        Ok(rooms)
    }

    async fn create_with_owner(&self, room: &NewRoom) -> RepoResult<ChatRoom> {
        self.check_write()?;
        let mut state = self.state();
        if !state.users.iter().any(|u| u.id == room.created_by) {
            return Err(DomainError::UserNotFound(room.created_by));
        }

        let (id, created_at) = state.next();
        let created = ChatRoom {
            id,
            name: room.name.clone(),
            description: room.description.clone(),
            created_by: room.created_by,
            created_at,
        };
        state.rooms.push(created.clone());
        state.members.push(RoomMember {
            user_id: room.created_by,
            room_id: id,
        });
        Ok(created)
    }

    async fn members(&self, room_id: RecordId) -> RepoResult<Vec<RoomMember>> {
        self.check_read()?;
        Ok(self
            .state()
            .members
            .iter()
            .filter(|m| m.room_id == room_id)
            .copied()
            .collect())
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn create(&self, message: &NewMessage) -> RepoResult<MessageWithAuthor> {
        self.check_write()?;
        let mut state = self.state();
        if !state.rooms.iter().any(|r| r.id == message.room_id) {
            return Err(DomainError::RoomNotFound(message.room_id));
        }
        if !state.users.iter().any(|u| u.id == message.user_id) {
            return Err(DomainError::UserNotFound(message.user_id));
        }

        let (id, created_at) = state.next();
        let stored = Message {
            id,
            content: message.content.clone(),
            user_id: message.user_id,
            room_id: message.room_id,
            created_at,
        };
        state.messages.push(stored.clone());
        state
            .with_author(&stored)
            .ok_or(DomainError::UserNotFound(message.user_id))
    }

    async fn find_by_room(
        &self,
        room_id: RecordId,
        query: MessageQuery,
    ) -> RepoResult<Vec<MessageWithAuthor>> {
        self.check_read()?;
        let state = self.state();
        let limit = query.limit.max(1) as usize;

        let cursor_key = |id: RecordId| {
            state
                .messages
                .iter()
                .find(|m| m.id == id)
                .map(Message::sort_key)
        };

        let mut in_room: Vec<&Message> = state
            .messages
            .iter()
            .filter(|m| m.room_id == room_id)
            .collect();
        in_room.sort_by_key(|m| m.sort_key());

        let page: Vec<&Message> = match (query.before, query.after) {
            (Some(before), None) => {
                let Some(key) = cursor_key(before) else {
                    return Ok(Vec::new());
                };
                let older: Vec<_> = in_room.into_iter().filter(|m| m.sort_key() < key).collect();
                older[older.len().saturating_sub(limit)..].to_vec()
            }
            (None, Some(after)) => {
                let Some(key) = cursor_key(after) else {
                    return Ok(Vec::new());
                };
                in_room
                    .into_iter()
                    .filter(|m| m.sort_key() > key)
                    .take(limit)
                    .collect()
            }
            _ => in_room[in_room.len().saturating_sub(limit)..].to_vec(),
        };

        Ok(page.into_iter().filter_map(|m| state.with_author(m)).collect())
    }
}

/// Build a context backed by a fresh in-memory store
pub fn test_context() -> (ServiceContext, Arc<InMemoryStore>) {
    test_context_with_tokens(SessionTokens::new(TEST_SECRET, 604_800))
}

/// Like [`test_context`] but signing sessions with `tokens`
pub fn test_context_with_tokens(tokens: SessionTokens) -> (ServiceContext, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::default());
    let ctx = ServiceContextBuilder::new()
        .user_repo(store.clone())
        .room_repo(store.clone())
        .message_repo(store.clone())
        .session_tokens(Arc::new(tokens))
        .room_hub(RoomHub::default())
        .build()
        .expect("test context must build");
    (ctx, store)
}
