//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and orchestrates
//! validation, repository calls and room event publication.

pub mod auth;
pub mod context;
pub mod error;
pub mod message;
pub mod room;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use auth::{AuthService, LoginOutcome};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use room::RoomService;
