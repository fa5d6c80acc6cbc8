//! User handlers

use axum::Json;
use chat_service::UserResponse;

use crate::extractors::OptionalCurrentUser;

/// Get the user behind the session, or `null`
///
/// GET /users/@me
pub async fn get_current_user(
    OptionalCurrentUser(user): OptionalCurrentUser,
) -> Json<Option<UserResponse>> {
    Json(user.map(UserResponse::from))
}
