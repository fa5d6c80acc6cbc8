//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
