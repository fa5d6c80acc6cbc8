//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, events, health, messages, rooms, users};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(room_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/@me", get(users::get_current_user))
}

/// Room, message and event stream routes
fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(rooms::list_rooms).post(rooms::create_room))
        .route(
            "/rooms/:room_id/messages",
            get(messages::get_messages).post(messages::create_message),
        )
        .route("/rooms/:room_id/events", get(events::room_events))
}
