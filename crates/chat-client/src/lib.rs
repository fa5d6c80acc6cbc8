//! # chat-client
//!
//! Client side of the chat service: a cookie-carrying HTTP client, a
//! WebSocket room event subscription and the fixed-interval polling loop
//! that keeps a room's message list fresh.

pub mod client;
pub mod error;
pub mod models;
pub mod poller;

pub use client::{ChatClient, RoomEventStream};
pub use error::{ClientError, ClientResult};
pub use models::{ChatMessage, MessagePage, Room, User};
pub use poller::{MessageSource, PollerConfig, PollerState, RoomPoller, RoomSnapshot};
