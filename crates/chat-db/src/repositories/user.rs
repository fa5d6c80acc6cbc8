//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use chat_core::entities::{NewUser, User};
use chat_core::error::DomainError;
use chat_core::traits::{RepoResult, UserRepository};
use chat_core::value_objects::RecordId;

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, avatar_url, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_identity(&self, username: &str, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, avatar_url, created_at
            FROM users
            WHERE username = $1 OR email = $2
            ORDER BY id ASC
            LIMIT 1
            ",
        )
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (username, email, avatar_url)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, avatar_url, created_at
            ",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.avatar_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::IdentityTaken))?;

        Ok(User::from(model))
    }
}
