//! Session extractors
//!
//! Read the session cookie and resolve it to a user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use chat_core::entities::User;
use chat_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Raw session token from the cookie, if any
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        Ok(SessionToken(
            jar.get(app_state.cookie_name())
                .map(|cookie| cookie.value().to_string())
                .filter(|value| !value.is_empty()),
        ))
    }
}

/// Authenticated user
///
/// Rejects with 401 when the cookie is missing, invalid, expired or
/// names a user that no longer exists.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let OptionalCurrentUser(user) = OptionalCurrentUser::from_request_parts(parts, state).await?;
        user.map(CurrentUser).ok_or(ApiError::Unauthenticated)
    }
}

/// User behind the session cookie, or `None`
#[derive(Debug, Clone)]
pub struct OptionalCurrentUser(pub Option<User>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalCurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = SessionToken::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);

        let user = AuthService::new(app_state.service_context())
            .current_user(token.as_deref())
            .await;

        Ok(OptionalCurrentUser(user))
    }
}
