//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

/// Reject values that are empty once surrounding whitespace is removed
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if chat_core::is_blank(value) {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Pick a single human-readable message out of a validation failure
///
/// Fields are visited in name order so the result is stable.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
            })
        })
        .unwrap_or_else(|| "Invalid request".to_string())
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Login request; unknown identities are provisioned on the spot
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        custom(function = "not_blank", message = "Username and email are required"),
        length(max = 64, message = "Username must be at most 64 characters")
    )]
    pub username: String,

    #[validate(
        custom(function = "not_blank", message = "Username and email are required"),
        length(max = 254, message = "Email must be at most 254 characters")
    )]
    pub email: String,
}

impl LoginRequest {
    /// Username and email with surrounding whitespace removed
    pub fn normalized(&self) -> (&str, &str) {
        (self.username.trim(), self.email.trim())
    }
}

// ============================================================================
// Room Requests
// ============================================================================

/// Create room request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(
        custom(function = "not_blank", message = "Room name is required"),
        length(max = 100, message = "Room name must be at most 100 characters")
    )]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    #[serde(default)]
    pub description: Option<String>,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Send message request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(
        custom(function = "not_blank", message = "Message content is required"),
        length(max = 4000, message = "Message must be at most 4000 characters")
    )]
    pub content: String,
}
