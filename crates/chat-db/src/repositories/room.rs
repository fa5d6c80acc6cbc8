//! PostgreSQL implementation of RoomRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use chat_core::entities::{ChatRoom, NewRoom, RoomMember, RoomSummary};
use chat_core::error::DomainError;
use chat_core::traits::{RepoResult, RoomRepository};
use chat_core::value_objects::RecordId;

use crate::models::{ChatRoomModel, RoomMemberModel, RoomWithCreatorModel};

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of RoomRepository
#[derive(Clone)]
pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    /// Create a new PgRoomRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<ChatRoom>> {
        let result = sqlx::query_as::<_, ChatRoomModel>(
            r"
            SELECT id, name, description, created_by, created_at
            FROM chat_rooms
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChatRoom::from))
    }

    #[instrument(skip(self))]
    async fn list_with_creator(&self) -> RepoResult<Vec<RoomSummary>> {
        let results = sqlx::query_as::<_, RoomWithCreatorModel>(
            r"
            SELECT r.id, r.name, r.description, r.created_by, r.created_at,
                   u.username AS created_by_username
            FROM chat_rooms r
            INNER JOIN users u ON u.id = r.created_by
            ORDER BY r.created_at DESC, r.id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(RoomSummary::from).collect())
    }

    #[instrument(skip(self))]
    async fn create_with_owner(&self, room: &NewRoom) -> RepoResult<ChatRoom> {
        let creator = room.created_by;
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, ChatRoomModel>(
            r"
            INSERT INTO chat_rooms (name, description, created_by)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, created_by, created_at
            ",
        )
        .bind(&room.name)
        .bind(room.description.as_deref())
        .bind(creator.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_foreign_key_violation(e, |_| DomainError::UserNotFound(creator)))?;

        sqlx::query(
            r"
            INSERT INTO room_members (user_id, room_id)
            VALUES ($1, $2)
            ",
        )
        .bind(creator.into_inner())
        .bind(model.id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(ChatRoom::from(model))
    }

    #[instrument(skip(self))]
    async fn members(&self, room_id: RecordId) -> RepoResult<Vec<RoomMember>> {
        let results = sqlx::query_as::<_, RoomMemberModel>(
            r"
            SELECT user_id, room_id, joined_at
            FROM room_members
            WHERE room_id = $1
            ORDER BY joined_at ASC, user_id ASC
            ",
        )
        .bind(room_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(RoomMember::from).collect())
    }
}
