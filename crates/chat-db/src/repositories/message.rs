//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use chat_core::entities::{MessageWithAuthor, NewMessage};
use chat_core::error::DomainError;
use chat_core::traits::{MessageQuery, MessageRepository, RepoResult};
use chat_core::value_objects::RecordId;

use crate::models::MessageWithAuthorModel;

use super::error::{map_db_error, map_foreign_key_violation};

/// Name of the FK constraint tying messages to rooms (PostgreSQL default naming)
const ROOM_FK_CONSTRAINT: &str = "messages_room_id_fkey";

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message), fields(room_id = %message.room_id, user_id = %message.user_id))]
    async fn create(&self, message: &NewMessage) -> RepoResult<MessageWithAuthor> {
        let model = sqlx::query_as::<_, MessageWithAuthorModel>(
            r#"
            WITH inserted AS (
                INSERT INTO messages (content, user_id, room_id)
                VALUES ($1, $2, $3)
                RETURNING id, content, user_id, room_id, created_at
            )
            SELECT i.id, i.content, i.user_id, i.room_id, i.created_at,
                   u.username, u.avatar_url
            FROM inserted i
            INNER JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(&message.content)
        .bind(message.user_id.into_inner())
        .bind(message.room_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, |constraint| match constraint {
                Some(ROOM_FK_CONSTRAINT) => DomainError::RoomNotFound(message.room_id),
                _ => DomainError::UserNotFound(message.user_id),
            })
        })?;

        Ok(MessageWithAuthor::from(model))
    }

    /// `query.limit` is used as given; callers clamp it.
    #[instrument(skip(self))]
    async fn find_by_room(
        &self,
        room_id: RecordId,
        query: MessageQuery,
    ) -> RepoResult<Vec<MessageWithAuthor>> {
        let limit = query.limit.max(1);

        let mut results = match (query.before, query.after) {
            (Some(before), None) => {
                // Page just older than the cursor (scrolling up)
                sqlx::query_as::<_, MessageWithAuthorModel>(
                    r#"
                    SELECT m.id, m.content, m.user_id, m.room_id, m.created_at,
                           u.username, u.avatar_url
                    FROM messages m
                    INNER JOIN users u ON u.id = m.user_id
                    WHERE m.room_id = $1
                      AND (m.created_at, m.id) < (SELECT created_at, id FROM messages WHERE id = $2)
                    ORDER BY m.created_at DESC, m.id DESC
                    LIMIT $3
                    "#,
                )
                .bind(room_id.into_inner())
                .bind(before.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            (None, Some(after)) => {
                // Oldest messages newer than the cursor (catching up)
                sqlx::query_as::<_, MessageWithAuthorModel>(
                    r#"
                    SELECT m.id, m.content, m.user_id, m.room_id, m.created_at,
                           u.username, u.avatar_url
                    FROM messages m
                    INNER JOIN users u ON u.id = m.user_id
                    WHERE m.room_id = $1
                      AND (m.created_at, m.id) > (SELECT created_at, id FROM messages WHERE id = $2)
                    ORDER BY m.created_at ASC, m.id ASC
                    LIMIT $3
                    "#,
                )
                .bind(room_id.into_inner())
                .bind(after.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                // Latest messages (no cursor)
                sqlx::query_as::<_, MessageWithAuthorModel>(
                    r#"
                    SELECT m.id, m.content, m.user_id, m.room_id, m.created_at,
                           u.username, u.avatar_url
                    FROM messages m
                    INNER JOIN users u ON u.id = m.user_id
                    WHERE m.room_id = $1
                    ORDER BY m.created_at DESC, m.id DESC
                    LIMIT $2
                    "#,
                )
                .bind(room_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        // Descending queries are flipped so every page reads oldest first
        if !matches!((query.before, query.after), (None, Some(_))) {
            results.reverse();
        }

        Ok(results.into_iter().map(MessageWithAuthor::from).collect())
    }
}
