//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Record ids are serialized as JSON numbers.

use chat_core::RecordId;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Bare acknowledgement: `{"success": true}`
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// User as returned to its own session
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: RecordId,
    pub username: String,
    pub email: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
}

/// Successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserResponse,
}

impl LoginResponse {
    pub fn new(user: UserResponse) -> Self {
        Self {
            success: true,
            user,
        }
    }
}

// ============================================================================
// Room Responses
// ============================================================================

/// Room with its creator's username
#[derive(Debug, Clone, Serialize)]
pub struct RoomResponse {
    pub id: RecordId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_by: RecordId,
    pub created_by_username: String,
    pub created_at: DateTime<Utc>,
}

/// Successful room creation
#[derive(Debug, Clone, Serialize)]
pub struct CreateRoomResponse {
    pub success: bool,
    pub room: RoomResponse,
}

impl CreateRoomResponse {
    pub fn new(room: RoomResponse) -> Self {
        Self {
            success: true,
            room,
        }
    }
}

// ============================================================================
// Message Responses
// ============================================================================

/// Message with its author's display fields
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: RecordId,
    pub content: String,
    pub user_id: RecordId,
    pub room_id: RecordId,
    pub created_at: DateTime<Utc>,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Successful message send
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message: MessageResponse,
}

impl SendMessageResponse {
    pub fn new(message: MessageResponse) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// One page of a room's history, oldest first
#[derive(Debug, Clone, Serialize, Default)]
pub struct MessagePage {
    pub messages: Vec<MessageResponse>,
    pub has_more: bool,
}

impl MessagePage {
    /// Page used when the history could not be read
    pub fn empty() -> Self {
        Self::default()
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
