//! Room polling loop
//!
//! Keeps the message list of the selected room fresh by re-fetching it on
//! a fixed interval. At most one timer task exists at a time: selecting a
//! room aborts the previous task before the new one is spawned. Every
//! successful fetch replaces the list wholesale. Fetches are numbered when
//! they start; a result older than the one already shown is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chat_core::traits::MessageQuery;
use chat_core::RecordId;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::client::ChatClient;
use crate::error::ClientResult;
use crate::models::ChatMessage;

/// Default time between two fetches
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Anything that can produce the current message list of a room
#[async_trait]
pub trait MessageSource: Send + Sync + 'static {
    async fn fetch_messages(&self, room_id: RecordId) -> ClientResult<Vec<ChatMessage>>;
}

#[async_trait]
impl MessageSource for ChatClient {
    async fn fetch_messages(&self, room_id: RecordId) -> ClientResult<Vec<ChatMessage>> {
        let page = self.list_messages(room_id, MessageQuery::default()).await?;
        Ok(page.messages)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    /// No room selected
    Idle,
    /// Polling the given room
    Polling(RecordId),
}

/// What observers see: the active room and its latest message list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room_id: Option<RecordId>,
    pub messages: Vec<ChatMessage>,
}

/// Snapshot sender shared by the timer task and `refresh_now`
struct Shared {
    snapshot: watch::Sender<RoomSnapshot>,
    /// Last sequence number handed to a fetch
    issued: AtomicU64,
    /// Sequence number of the fetch currently shown
    applied: AtomicU64,
}

impl Shared {
    fn new() -> Self {
        let (snapshot, _) = watch::channel(RoomSnapshot::default());
        Self {
            snapshot,
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
        }
    }

    fn next_seq(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Fixed-interval poller for one room at a time
pub struct RoomPoller<S: MessageSource> {
    source: Arc<S>,
    config: PollerConfig,
    shared: Arc<Shared>,
    task: Option<JoinHandle<()>>,
}

impl<S: MessageSource> RoomPoller<S> {
    pub fn new(source: Arc<S>, config: PollerConfig) -> Self {
        Self {
            source,
            config,
            shared: Arc::new(Shared::new()),
            task: None,
        }
    }

    pub fn state(&self) -> PollerState {
        match self.shared.snapshot.borrow().room_id {
            Some(room_id) => PollerState::Polling(room_id),
            None => PollerState::Idle,
        }
    }

    /// Watch the snapshot; the receiver sees every replacement
    pub fn subscribe(&self) -> watch::Receiver<RoomSnapshot> {
        self.shared.snapshot.subscribe()
    }

    /// Current snapshot
    pub fn snapshot(&self) -> RoomSnapshot {
        self.shared.snapshot.borrow().clone()
    }

    /// Make `room_id` the active room and start polling it
    ///
    /// The list is cleared and the first fetch runs immediately.
    pub fn select_room(&mut self, room_id: RecordId) {
        self.stop();

        self.shared.snapshot.send_replace(RoomSnapshot {
            room_id: Some(room_id),
            messages: Vec::new(),
        });

        let source = self.source.clone();
        let shared = self.shared.clone();
        let period = self.config.interval;

        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                refresh(source.as_ref(), &shared, room_id).await;
            }
        }));

        debug!(room_id = %room_id, "Polling room");
    }

    /// Stop polling and forget the active room
    pub fn clear_room(&mut self) {
        self.stop();
        self.shared.snapshot.send_replace(RoomSnapshot::default());
    }

    /// Fetch the active room right away, outside the timer
    pub async fn refresh_now(&self) {
        let active = self.shared.snapshot.borrow().room_id;
        let Some(room_id) = active else {
            return;
        };
        refresh(self.source.as_ref(), &self.shared, room_id).await;
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<S: MessageSource> Drop for RoomPoller<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn refresh<S: MessageSource + ?Sized>(source: &S, shared: &Shared, room_id: RecordId) {
    let seq = shared.next_seq();
    match source.fetch_messages(room_id).await {
        Ok(messages) => {
            apply(shared, room_id, seq, messages);
        }
        Err(e) => warn!(room_id = %room_id, error = %e, "Failed to refresh messages"),
    }
}

/// Replace the list if `room_id` is still active and fetch `seq` started
/// after the one currently shown
///
/// Returns whether the snapshot changed.
fn apply(shared: &Shared, room_id: RecordId, seq: u64, messages: Vec<ChatMessage>) -> bool {
    // The watch write lock serializes the check and the update
    shared.snapshot.send_if_modified(|current| {
        if current.room_id != Some(room_id) {
            debug!(room_id = %room_id, "Discarding result for inactive room");
            return false;
        }
        if seq <= shared.applied.load(Ordering::SeqCst) {
            debug!(room_id = %room_id, seq, "Discarding result older than the shown list");
            return false;
        }
        shared.applied.store(seq, Ordering::SeqCst);
        current.messages = messages;
        true
    })
}
