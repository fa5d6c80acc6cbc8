//! Test fixtures and data generators
//!
//! The database outlives a test run, so every identity and room name is
//! made unique per call.

use serde::Serialize;
use serde_json::{json, Value};

/// Unique suffix for test data
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub email: String,
}

impl LoginRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user_{suffix}"),
            email: format!("user_{suffix}@example.com"),
        }
    }
}

/// Create-room request body with a unique name
pub fn unique_room() -> Value {
    json!({ "name": format!("room-{}", unique_suffix()) })
}

/// Send-message request body
pub fn message(content: &str) -> Value {
    json!({ "content": content })
}
