//! HTTP and WebSocket client for the chat API
//!
//! The session cookie set by `login` lives in a shared cookie jar and is
//! replayed on every HTTP call and on the WebSocket handshake.

use std::pin::Pin;
use std::sync::Arc;

use chat_core::traits::MessageQuery;
use chat_core::{RecordId, RoomEvent};
use futures_util::{Stream, StreamExt};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{header, Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio_tungstenite::tungstenite::{client::IntoClientRequest, Message};
use tracing::{debug, instrument};

use crate::error::{ClientError, ClientResult};
use crate::models::{
    ChatMessage, ErrorBody, LoginEnvelope, MessageEnvelope, MessagePage, Room, RoomEnvelope, User,
};

/// Stream of events for one room; ends when the server closes the socket
pub type RoomEventStream = Pin<Box<dyn Stream<Item = ClientResult<RoomEvent>> + Send>>;

/// Client for one user session
#[derive(Clone)]
pub struct ChatClient {
    http: Client,
    jar: Arc<Jar>,
    base_url: Url,
}

impl ChatClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:8080`)
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        let jar = Arc::new(Jar::default());
        let http = Client::builder().cookie_provider(jar.clone()).build()?;

        Ok(Self {
            http,
            jar,
            base_url,
        })
    }

    fn api_url(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(&format!("/api/v1{path}"))
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }

    /// Decode a success body, or turn `{"error"}` into [`ClientError::Api`]
    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("Request failed").to_string(),
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Log in, creating the account on first use
    #[instrument(skip(self))]
    pub async fn login(&self, username: &str, email: &str) -> ClientResult<User> {
        let response = self
            .http
            .post(self.api_url("/auth/login")?)
            .json(&json!({ "username": username, "email": email }))
            .send()
            .await?;

        let envelope: LoginEnvelope = Self::decode(response).await?;
        debug!(user_id = %envelope.user.id, "Logged in");
        Ok(envelope.user)
    }

    /// Log out; the server clears the session cookie
    pub async fn logout(&self) -> ClientResult<()> {
        let response = self.http.post(self.api_url("/auth/logout")?).send().await?;
        let _: serde_json::Value = Self::decode(response).await?;
        Ok(())
    }

    /// User behind the current session, if any
    pub async fn current_user(&self) -> ClientResult<Option<User>> {
        let response = self.http.get(self.api_url("/users/@me")?).send().await?;
        Self::decode(response).await
    }

    pub async fn list_rooms(&self) -> ClientResult<Vec<Room>> {
        let response = self.http.get(self.api_url("/rooms")?).send().await?;
        Self::decode(response).await
    }

    pub async fn create_room(&self, name: &str, description: Option<&str>) -> ClientResult<Room> {
        let response = self
            .http
            .post(self.api_url("/rooms")?)
            .json(&json!({ "name": name, "description": description }))
            .send()
            .await?;

        let envelope: RoomEnvelope = Self::decode(response).await?;
        Ok(envelope.room)
    }

    #[instrument(skip(self, content))]
    pub async fn send_message(&self, room_id: RecordId, content: &str) -> ClientResult<ChatMessage> {
        let response = self
            .http
            .post(self.api_url(&format!("/rooms/{room_id}/messages"))?)
            .json(&json!({ "content": content }))
            .send()
            .await?;

        let envelope: MessageEnvelope = Self::decode(response).await?;
        Ok(envelope.message)
    }

    /// Fetch one page of a room's history
    pub async fn list_messages(
        &self,
        room_id: RecordId,
        query: MessageQuery,
    ) -> ClientResult<MessagePage> {
        let mut params = vec![("limit", query.limit.to_string())];
        if let Some(before) = query.before {
            params.push(("before", before.to_string()));
        }
        if let Some(after) = query.after {
            params.push(("after", after.to_string()));
        }

        let response = self
            .http
            .get(self.api_url(&format!("/rooms/{room_id}/messages"))?)
            .query(&params)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Open the room's event stream
    ///
    /// Requires a logged-in session; the cookie is sent on the handshake.
    #[instrument(skip(self))]
    pub async fn subscribe(&self, room_id: RecordId) -> ClientResult<RoomEventStream> {
        let http_url = self.api_url(&format!("/rooms/{room_id}/events"))?;

        let mut ws_url = http_url.clone();
        let scheme = if http_url.scheme() == "https" { "wss" } else { "ws" };
        ws_url
            .set_scheme(scheme)
            .map_err(|()| ClientError::InvalidUrl(http_url.to_string()))?;

        let mut request = ws_url.as_str().into_client_request()?;
        if let Some(cookies) = self.jar.cookies(&http_url) {
            request.headers_mut().insert(header::COOKIE, cookies);
        }

        let (socket, _) = tokio_tungstenite::connect_async(request).await?;
        debug!("Room event stream connected");

        let events = socket.filter_map(|frame| async move {
            match frame {
                Ok(Message::Text(text)) => {
                    Some(serde_json::from_str::<RoomEvent>(&text).map_err(ClientError::from))
                }
                Ok(_) => None,
                Err(e) => Some(Err(ClientError::from(e))),
            }
        });

        Ok(Box::pin(events))
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
