//! Realtime room event fan-out

mod hub;

pub use hub::{RoomHub, RoomSubscription, DEFAULT_EVENT_BUFFER};
