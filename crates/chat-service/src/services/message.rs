//! Message service
//!
//! Appends messages to rooms and pages through room history.

use chat_core::entities::{NewMessage, User};
use chat_core::traits::{clamp_limit, MessageQuery};
use chat_core::{DomainError, MessageCreatedEvent, RecordId, RoomEvent};
use tracing::{error, info, instrument};
use validator::Validate;

use crate::dto::{MessagePage, MessageResponse, SendMessageRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Store a message and push it to the room's subscribers
    ///
    /// Whitespace-only content is rejected before touching the store.
    /// Content is stored exactly as submitted.
    #[instrument(skip(self, author, request), fields(user_id = %author.id))]
    pub async fn send_message(
        &self,
        author: &User,
        room_id: RecordId,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        request.validate()?;

        let new_message = NewMessage {
            content: request.content,
            user_id: author.id,
            room_id,
        };

        let created = self
            .ctx
            .message_repo()
            .create(&new_message)
            .await
            .map_err(|e| match e {
                DomainError::RoomNotFound(_) => ServiceError::from(e),
                other => {
                    error!(error = %other, "Failed to send message");
                    ServiceError::internal("Failed to send message")
                }
            })?;

        let delivered = self.ctx.room_hub().publish(
            room_id,
            RoomEvent::MessageCreated(MessageCreatedEvent::from(&created)),
        );

        info!(message_id = %created.message.id, delivered, "Message sent");

        Ok(MessageResponse::from(&created))
    }

    /// Fetch one page of a room's history, oldest first
    ///
    /// `before` wins when both cursors are given. A read failure is
    /// logged and yields an empty page.
    #[instrument(skip(self))]
    pub async fn list_messages(&self, room_id: RecordId, query: MessageQuery) -> MessagePage {
        let limit = clamp_limit(query.limit);
        let after = if query.before.is_some() { None } else { query.after };

        // One extra row tells us whether another page exists
        let probe = MessageQuery {
            before: query.before,
            after,
            limit: limit + 1,
        };

        let mut rows = match self.ctx.message_repo().find_by_room(room_id, probe).await {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "Failed to list messages");
                return MessagePage::empty();
            }
        };

        let page_len = limit as usize;
        let has_more = rows.len() > page_len;
        if has_more {
            if after.is_some() {
                rows.truncate(page_len);
            } else {
                rows.drain(..rows.len() - page_len);
            }
        }

        MessagePage {
            messages: rows.iter().map(MessageResponse::from).collect(),
            has_more,
        }
    }
}
