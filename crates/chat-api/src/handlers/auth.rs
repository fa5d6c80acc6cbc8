//! Authentication handlers
//!
//! Login by username and email, logout. The session lives in an
//! HttpOnly cookie.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chat_service::{AuthService, LoginRequest, LoginResponse, SuccessResponse, UserResponse};

use crate::extractors::{SessionToken, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Build the session cookie carrying `token`
pub fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((state.cookie_name().to_string(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config().app.env.is_production())
        .max_age(time::Duration::seconds(state.session_tokens().ttl_secs()))
        .build()
}

/// Build a cookie that clears the session on the client
pub fn removal_cookie(state: &AppState) -> Cookie<'static> {
    let mut cookie = session_cookie(state, String::new());
    cookie.make_removal();
    cookie
}

/// Login, provisioning the user on first contact
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let outcome = AuthService::new(state.service_context())
        .login(request)
        .await?;

    let jar = jar.add(session_cookie(&state, outcome.token));
    Ok((jar, Json(LoginResponse::new(UserResponse::from(outcome.user)))))
}

/// Logout; always succeeds
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    token: SessionToken,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    AuthService::new(state.service_context()).logout(token.as_deref());
    (jar.add(removal_cookie(&state)), Json(SuccessResponse::ok()))
}
