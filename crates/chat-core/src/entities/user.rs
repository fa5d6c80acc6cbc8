//! User entity - represents a chat identity

use chrono::{DateTime, Utc};
use url::form_urlencoded;

use crate::value_objects::RecordId;

/// Base URL of the avatar generator used for auto-provisioned users
pub const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg";

/// Derive the avatar URL for a username
///
/// The same username always yields the same URL. The seed is
/// form-urlencoded.
pub fn avatar_url_for(username: &str) -> String {
    let seed: String = form_urlencoded::byte_serialize(username.as_bytes()).collect();
    format!("{AVATAR_BASE_URL}?seed={seed}")
}

/// User entity
///
/// Users are created on first login and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Avatar URL, falling back to the derived one when none was stored
    pub fn avatar(&self) -> String {
        self.avatar_url
            .clone()
            .unwrap_or_else(|| avatar_url_for(&self.username))
    }

    /// Check whether this user matches either half of a login pair
    pub fn matches_identity(&self, username: &str, email: &str) -> bool {
        self.username == username || self.email == email
    }
}

/// Values for a user that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub avatar_url: String,
}

impl NewUser {
    /// Build an insertable user with its derived avatar
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        let username = username.into();
        let avatar_url = avatar_url_for(&username);
        Self {
            username,
            email: email.into(),
            avatar_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            id: RecordId::new(1),
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            avatar_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_avatar_is_deterministic() {
        assert_eq!(avatar_url_for("alice"), avatar_url_for("alice"));
        assert_ne!(avatar_url_for("alice"), avatar_url_for("bob"));
        assert_eq!(
            avatar_url_for("alice"),
            "https://api.dicebear.com/7.x/avataaars/svg?seed=alice"
        );
    }

    #[test]
    fn test_avatar_seed_is_encoded() {
        assert_eq!(
            avatar_url_for("a b&c#d"),
            "https://api.dicebear.com/7.x/avataaars/svg?seed=a+b%26c%23d"
        );

        let url = url::Url::parse(&avatar_url_for("tom & jerry")).unwrap();
        let seeds: Vec<_> = url.query_pairs().collect();
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].0, "seed");
        assert_eq!(seeds[0].1, "tom & jerry");
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_new_user_derives_avatar() {
        let user = NewUser::new("alice", "alice@x.com");
        assert_eq!(user.avatar_url, avatar_url_for("alice"));
    }

    #[test]
    fn test_avatar_fallback() {
        let mut user = alice();
        assert_eq!(user.avatar(), avatar_url_for("alice"));

        user.avatar_url = Some("https://cdn.example.com/a.png".to_string());
        assert_eq!(user.avatar(), "https://cdn.example.com/a.png");
    }

    #[test]
    fn test_matches_identity_on_either_field() {
        let user = alice();
        assert!(user.matches_identity("alice", "other@x.com"));
        assert!(user.matches_identity("someone", "alice@x.com"));
        assert!(!user.matches_identity("bob", "bob@x.com"));
    }
}
