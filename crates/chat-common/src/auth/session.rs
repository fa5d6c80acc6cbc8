//! Session tokens
//!
//! A session is a signed HS256 JWT naming the user id. It lives in an
//! HttpOnly cookie; there is no server-side session table.

use chat_core::RecordId;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Random session ID, distinguishes two logins of the same user
    pub sid: String,
}

impl SessionClaims {
    /// Get the user ID carried by the token
    ///
    /// # Errors
    /// Returns an error if the subject is not a valid record id
    pub fn user_id(&self) -> Result<RecordId, AppError> {
        RecordId::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Signs and verifies session tokens
#[derive(Clone)]
pub struct SessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl SessionTokens {
    /// Create a token service with the given secret and lifetime
    #[must_use]
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self::from_keys(
            EncodingKey::from_secret(secret.as_bytes()),
            DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        )
    }

    /// Create a token service from prepared keys
    ///
    /// Tokens are always signed with HS256; keys of another family make
    /// [`Self::issue`] fail.
    #[must_use]
    pub fn from_keys(encoding_key: EncodingKey, decoding_key: DecodingKey, ttl_secs: i64) -> Self {
        Self {
            encoding_key,
            decoding_key,
            ttl_secs,
        }
    }

    /// Token lifetime in seconds (also used as the cookie Max-Age)
    #[must_use]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issue a session token for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, user_id: RecordId) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
            sid: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode session token")))
    }

    /// Decode and validate a session token
    ///
    /// # Errors
    /// Returns an error if the token is malformed, tampered with, or expired
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        let validation = Validation::default();

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                    _ => AppError::InvalidToken,
                }
            })?;

        Ok(token_data.claims)
    }

    /// Resolve a token straight to the user id it names
    ///
    /// # Errors
    /// Returns an error if the token does not verify
    pub fn user_id(&self, token: &str) -> Result<RecordId, AppError> {
        self.verify(token)?.user_id()
    }
}

impl std::fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokens")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> SessionTokens {
        SessionTokens::new("test-secret-key-that-is-long-enough", 604_800)
    }

    #[test]
    fn test_issue_and_verify() {
        let service = create_test_service();
        let token = service.issue(RecordId::new(42)).unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.exp - claims.iat, 604_800);
        assert!(!claims.is_expired());
        assert_eq!(service.user_id(&token).unwrap(), RecordId::new(42));
    }

    #[test]
    fn test_session_ids_are_unique() {
        let service = create_test_service();
        let a = service.verify(&service.issue(RecordId::new(1)).unwrap()).unwrap();
        let b = service.verify(&service.issue(RecordId::new(1)).unwrap()).unwrap();
        assert_ne!(a.sid, b.sid);
    }

    #[test]
    fn test_issue_with_mismatched_key_fails() {
        let service = SessionTokens::from_keys(
            EncodingKey::from_rsa_der(&[]),
            DecodingKey::from_secret(b"unused"),
            60,
        );
        assert!(matches!(service.issue(RecordId::new(1)), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service();
        let result = service.verify("invalid.token.here");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_test_service().issue(RecordId::new(7)).unwrap();
        let other = SessionTokens::new("a-completely-different-secret", 604_800);
        assert!(matches!(other.verify(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_expired_token() {
        // Past the default 60s validation leeway
        let service = SessionTokens::new("test-secret-key-that-is-long-enough", -300);
        let token = service.issue(RecordId::new(1)).unwrap();
        assert!(matches!(service.verify(&token), Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_claims_with_bad_subject() {
        let claims = SessionClaims {
            sub: "abc".to_string(),
            iat: 0,
            exp: i64::MAX,
            sid: "s".to_string(),
        };
        assert!(claims.user_id().is_err());
    }
}
