//! # chat-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and migrations embedded in the binary
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chat_db::{create_pool, run_migrations, DatabaseConfig, PgUserRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{
    create_pool, embedded_migrations, ping, run_migrations, DatabaseConfig, PgPool,
};
pub use repositories::{PgMessageRepository, PgRoomRepository, PgUserRepository};
