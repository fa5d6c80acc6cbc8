//! Axum extractors for request handling
//!
//! Custom extractors for sessions, validation, paths and pagination.

mod pagination;
mod path;
mod session;
mod validated;

pub use pagination::{Pagination, PaginationParams};
pub use path::RoomIdPath;
pub use session::{CurrentUser, OptionalCurrentUser, SessionToken};
pub use validated::ValidatedJson;
