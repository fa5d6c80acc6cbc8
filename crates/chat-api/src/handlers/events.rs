//! Room event stream
//!
//! Upgrades to a WebSocket and forwards the room's events as JSON text
//! frames until either side closes.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use chat_service::{RoomService, RoomSubscription};
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use crate::extractors::{CurrentUser, RoomIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Subscribe to a room's events
///
/// GET /rooms/{room_id}/events
pub async fn room_events(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    RoomIdPath(room_id): RoomIdPath,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    RoomService::new(state.service_context())
        .get_room(room_id)
        .await?;

    // Subscribe before the upgrade so nothing sent meanwhile is missed
    let subscription = state.room_hub().subscribe(room_id);
    info!(room_id = %room_id, user_id = %user.id, "Room event stream opened");

    Ok(ws.on_upgrade(move |socket| forward_events(socket, subscription)))
}

async fn forward_events(socket: WebSocket, mut subscription: RoomSubscription) {
    let room_id = subscription.room_id();
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = subscription.recv() => {
                let Some(event) = event else { break };

                let text = match serde_json::to_string(&event) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(error = %e, "Failed to encode room event");
                        continue;
                    }
                };

                if sender.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // Clients only listen; anything else they send is ignored
                Some(Ok(_)) => {}
            },
        }
    }

    debug!(room_id = %room_id, "Room event stream closed");
}
