//! Service context - dependency container for services
//!
//! Holds the repositories, the session token signer and the room hub.

use std::sync::Arc;

use chat_common::SessionTokens;
use chat_core::traits::{MessageRepository, RoomRepository, UserRepository};
use chat_db::PgPool;

use crate::realtime::RoomHub;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the dependency container that gets passed to all services.
/// The database pool is optional so that services can run against
/// in-memory repositories; without it the readiness probe reports unhealthy.
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    room_repo: Arc<dyn RoomRepository>,
    message_repo: Arc<dyn MessageRepository>,

    // Sessions
    session_tokens: Arc<SessionTokens>,

    // Realtime
    room_hub: RoomHub,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: Option<PgPool>,
        user_repo: Arc<dyn UserRepository>,
        room_repo: Arc<dyn RoomRepository>,
        message_repo: Arc<dyn MessageRepository>,
        session_tokens: Arc<SessionTokens>,
        room_hub: RoomHub,
    ) -> Self {
        Self {
            pool,
            user_repo,
            room_repo,
            message_repo,
            session_tokens,
            room_hub,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if one is configured
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Check that the database answers queries
    pub async fn database_ready(&self) -> bool {
        match &self.pool {
            Some(pool) => chat_db::ping(pool).await,
            None => false,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the room repository
    pub fn room_repo(&self) -> &dyn RoomRepository {
        self.room_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    // === Sessions & Realtime ===

    /// Get the session token signer
    pub fn session_tokens(&self) -> &SessionTokens {
        self.session_tokens.as_ref()
    }

    /// Get the room event hub
    pub fn room_hub(&self) -> &RoomHub {
        &self.room_hub
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("room_hub", &self.room_hub)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    room_repo: Option<Arc<dyn RoomRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    session_tokens: Option<Arc<SessionTokens>>,
    room_hub: Option<RoomHub>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn room_repo(mut self, repo: Arc<dyn RoomRepository>) -> Self {
        self.room_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn session_tokens(mut self, tokens: Arc<SessionTokens>) -> Self {
        self.session_tokens = Some(tokens);
        self
    }

    pub fn room_hub(mut self, hub: RoomHub) -> Self {
        self.room_hub = Some(hub);
        self
    }

    /// Build the ServiceContext
    ///
    /// The pool is optional and the hub defaults to [`RoomHub::default`].
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository or the token signer is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.room_repo
                .ok_or_else(|| ServiceError::validation("room_repo is required"))?,
            self.message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            self.session_tokens
                .ok_or_else(|| ServiceError::validation("session_tokens is required"))?,
            self.room_hub.unwrap_or_default(),
        ))
    }
}
