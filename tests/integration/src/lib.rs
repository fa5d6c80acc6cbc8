//! Integration test utilities for the chat server
//!
//! Helpers for running end-to-end tests against the HTTP API and the room
//! event stream, backed by a real PostgreSQL database.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
