//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Message row joined with its author's display fields
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithAuthorModel {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub room_id: i64,
    pub created_at: DateTime<Utc>,
    pub username: String,
    pub avatar_url: Option<String>,
}
