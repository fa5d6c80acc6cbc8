//! Room hub
//!
//! Fans room events out to every live subscriber of that room. One
//! `broadcast` channel exists per room that currently has subscribers;
//! it is dropped when the last subscriber goes away.

use std::sync::Arc;

use chat_core::{RecordId, RoomEvent};
use dashmap::DashMap;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

/// Default per-room buffer before slow subscribers start lagging
pub const DEFAULT_EVENT_BUFFER: usize = 256;

struct HubInner {
    rooms: DashMap<RecordId, broadcast::Sender<RoomEvent>>,
    capacity: usize,
}

/// Per-room event fan-out shared by the services and the WebSocket handler
#[derive(Clone)]
pub struct RoomHub {
    inner: Arc<HubInner>,
}

impl RoomHub {
    /// Create a hub whose room channels buffer `capacity` events
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(HubInner {
                rooms: DashMap::new(),
                capacity: capacity.max(1),
            }),
        }
    }

    /// Start receiving events for a room
    pub fn subscribe(&self, room_id: RecordId) -> RoomSubscription {
        let rx = self
            .inner
            .rooms
            .entry(room_id)
            .or_insert_with(|| broadcast::channel(self.inner.capacity).0)
            .subscribe();

        debug!(room_id = %room_id, "Room subscriber added");

        RoomSubscription {
            room_id,
            rx: Some(rx),
            hub: self.clone(),
        }
    }

    /// Publish an event to a room's current subscribers
    ///
    /// Returns how many subscribers received it; rooms nobody watches cost nothing.
    pub fn publish(&self, room_id: RecordId, event: RoomEvent) -> usize {
        match self.inner.rooms.get(&room_id) {
            Some(tx) => tx.send(event).unwrap_or(0),
            None => 0,
        }
    }

    /// Number of live subscribers for a room
    pub fn subscriber_count(&self, room_id: RecordId) -> usize {
        self.inner
            .rooms
            .get(&room_id)
            .map_or(0, |tx| tx.receiver_count())
    }

    /// Number of rooms with at least one subscriber
    pub fn active_rooms(&self) -> usize {
        self.inner.rooms.len()
    }

    /// Drop the room's channel once nobody listens to it
    fn release(&self, room_id: RecordId) {
        let removed = self
            .inner
            .rooms
            .remove_if(&room_id, |_, tx| tx.receiver_count() == 0)
            .is_some();

        if removed {
            debug!(room_id = %room_id, "Room channel pruned");
        }
    }
}

impl Default for RoomHub {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER)
    }
}

impl std::fmt::Debug for RoomHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomHub")
            .field("active_rooms", &self.active_rooms())
            .field("capacity", &self.inner.capacity)
            .finish()
    }
}

/// A live subscription to one room's events
///
/// Dropping it unsubscribes and prunes the room channel if it was the last one.
pub struct RoomSubscription {
    room_id: RecordId,
    rx: Option<broadcast::Receiver<RoomEvent>>,
    hub: RoomHub,
}

impl RoomSubscription {
    /// Room this subscription listens to
    pub fn room_id(&self) -> RecordId {
        self.room_id
    }

    /// Wait for the next event
    ///
    /// A subscriber that fell behind the buffer gets [`RoomEvent::Resync`]
    /// instead of the events it missed. Returns `None` once the hub is gone.
    pub async fn recv(&mut self) -> Option<RoomEvent> {
        let rx = self.rx.as_mut()?;
        match rx.recv().await {
            Ok(event) => Some(event),
            Err(RecvError::Lagged(skipped)) => {
                warn!(room_id = %self.room_id, skipped, "Room subscriber lagged; requesting resync");
                Some(RoomEvent::Resync)
            }
            Err(RecvError::Closed) => None,
        }
    }
}

impl Drop for RoomSubscription {
    fn drop(&mut self) {
        // The receiver must be gone before the count is checked
        drop(self.rx.take());
        self.hub.release(self.room_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::MessageCreatedEvent;
    use chrono::Utc;

    fn created(room_id: i64, id: i64) -> RoomEvent {
        RoomEvent::MessageCreated(MessageCreatedEvent {
            id: RecordId::new(id),
            content: format!("message {id}"),
            user_id: RecordId::new(1),
            room_id: RecordId::new(room_id),
            created_at: Utc::now(),
            username: "alice".to_string(),
            avatar_url: None,
        })
    }

    #[tokio::test]
    async fn test_event_reaches_every_subscriber_of_the_room() {
        let hub = RoomHub::default();
        let room = RecordId::new(1);
        let mut a = hub.subscribe(room);
        let mut b = hub.subscribe(room);

        assert_eq!(hub.publish(room, created(1, 10)), 2);

        assert_eq!(a.recv().await, Some(created(1, 10)));
        assert_eq!(b.recv().await, Some(created(1, 10)));
    }

    #[tokio::test]
    async fn test_event_does_not_leak_to_other_rooms() {
        let hub = RoomHub::default();
        let mut general = hub.subscribe(RecordId::new(1));
        let mut random = hub.subscribe(RecordId::new(2));

        hub.publish(RecordId::new(1), created(1, 10));
        hub.publish(RecordId::new(2), created(2, 11));

        assert_eq!(general.recv().await, Some(created(1, 10)));
        assert_eq!(random.recv().await, Some(created(2, 11)));
    }

    #[test]
    fn test_publish_without_subscribers() {
        let hub = RoomHub::default();
        assert_eq!(hub.publish(RecordId::new(1), created(1, 1)), 0);
        assert_eq!(hub.active_rooms(), 0);
    }

    #[test]
    fn test_last_subscriber_prunes_room() {
        let hub = RoomHub::default();
        let room = RecordId::new(7);

        let a = hub.subscribe(room);
        let b = hub.subscribe(room);
        assert_eq!(hub.subscriber_count(room), 2);

        drop(a);
        assert_eq!(hub.active_rooms(), 1);
        assert_eq!(hub.subscriber_count(room), 1);

        drop(b);
        assert_eq!(hub.active_rooms(), 0);
        assert_eq!(hub.subscriber_count(room), 0);
    }

    #[tokio::test]
    async fn test_lagging_subscriber_gets_resync() {
        let hub = RoomHub::new(2);
        let room = RecordId::new(3);
        let mut sub = hub.subscribe(room);

        for id in 0..5 {
            hub.publish(room, created(3, id));
        }

        assert_eq!(sub.recv().await, Some(RoomEvent::Resync));
        // After the resync the newest buffered events are still delivered
        assert_eq!(sub.recv().await, Some(created(3, 3)));
        assert_eq!(sub.recv().await, Some(created(3, 4)));
    }
}
