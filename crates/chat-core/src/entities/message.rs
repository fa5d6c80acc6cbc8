//! Message entity - represents an immutable chat post

use chrono::{DateTime, Utc};

use crate::value_objects::RecordId;

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: RecordId,
    pub content: String,
    pub user_id: RecordId,
    pub room_id: RecordId,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Ordering key used by every listing: creation time, then insertion order
    #[inline]
    pub fn sort_key(&self) -> (DateTime<Utc>, RecordId) {
        (self.created_at, self.id)
    }
}

/// Message joined with its author's display fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageWithAuthor {
    pub message: Message,
    pub username: String,
    pub avatar_url: Option<String>,
}

/// Values for a message that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub content: String,
    pub user_id: RecordId,
    pub room_id: RecordId,
}

/// Check that message content carries something other than whitespace
#[inline]
pub fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(content: &str) -> Message {
        Message {
            id: RecordId::new(1),
            content: content.to_string(),
            user_id: RecordId::new(10),
            room_id: RecordId::new(100),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \n\t"));
        assert!(!is_blank(" hi "));
    }

    #[test]
    fn test_sort_key_breaks_ties_by_id() {
        let now = Utc::now();
        let mut a = message("a");
        let mut b = message("b");
        a.created_at = now;
        b.created_at = now;
        b.id = RecordId::new(2);
        assert!(a.sort_key() < b.sort_key());
    }
}
