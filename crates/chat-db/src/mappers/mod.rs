//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions turning database rows into domain objects.
//! Inserts bind `chat-core`'s `New*` values directly.

mod message;
mod room;
mod user;
