//! Domain events

mod room_event;

pub use room_event::{MessageCreatedEvent, RoomEvent};
