//! Authentication service
//!
//! Resolves a username/email pair to a user (provisioning it on first
//! contact) and maps session tokens back to users.

use chat_core::entities::{NewUser, User};
use chat_core::DomainError;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

use crate::dto::LoginRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    /// Signed session token to place in the session cookie
    pub token: String,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Log in by username and email, creating the user if neither is known
    #[instrument(skip(self, request), fields(username = %request.username.trim()))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginOutcome> {
        request.validate()?;
        let (username, email) = request.normalized();

        let user = self.resolve_identity(username, email).await.map_err(|e| {
            error!(error = %e, "Login failed");
            ServiceError::internal("Login failed")
        })?;

        let token = self.ctx.session_tokens().issue(user.id).map_err(|e| {
            error!(user_id = %user.id, error = ?e, "Failed to issue session token");
            ServiceError::internal("Login failed")
        })?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome { user, token })
    }

    /// Find the user matching either field, or create one
    ///
    /// A unique violation on insert means a concurrent login created the
    /// identity first; the lookup is repeated once to pick that row up.
    async fn resolve_identity(&self, username: &str, email: &str) -> Result<User, DomainError> {
        let repo = self.ctx.user_repo();

        if let Some(user) = repo.find_by_identity(username, email).await? {
            debug!(user_id = %user.id, "Existing user matched");
            return Ok(user);
        }

        match repo.create(&NewUser::new(username, email)).await {
            Ok(user) => {
                info!(user_id = %user.id, "User provisioned");
                Ok(user)
            }
            Err(DomainError::IdentityTaken) => {
                warn!("Identity created concurrently; repeating lookup");
                repo.find_by_identity(username, email)
                    .await?
                    .ok_or(DomainError::IdentityTaken)
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve a session token to its user
    ///
    /// Missing, invalid or expired tokens, unknown users and lookup
    /// failures all yield `None`.
    #[instrument(skip(self, token))]
    pub async fn current_user(&self, token: Option<&str>) -> Option<User> {
        let token = token?;

        let user_id = match self.ctx.session_tokens().user_id(token) {
            Ok(id) => id,
            Err(e) => {
                debug!(error = %e, "Rejected session token");
                return None;
            }
        };

        match self.ctx.user_repo().find_by_id(user_id).await {
            Ok(user) => user,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Session user lookup failed");
                None
            }
        }
    }

    /// Like [`Self::current_user`] but fails when there is no valid session
    pub async fn require_user(&self, token: Option<&str>) -> ServiceResult<User> {
        self.current_user(token)
            .await
            .ok_or(ServiceError::Unauthenticated)
    }

    /// Record the end of a session
    ///
    /// Sessions are stateless; the caller clears the cookie.
    #[instrument(skip(self, token))]
    pub fn logout(&self, token: Option<&str>) {
        match token.map(|t| self.ctx.session_tokens().verify(t)) {
            Some(Ok(claims)) => info!(user_id = %claims.sub, session_id = %claims.sid, "User logged out"),
            _ => debug!("Logout without a valid session"),
        }
    }
}
