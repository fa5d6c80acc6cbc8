//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context and configuration.

use std::sync::Arc;

use chat_common::{AppConfig, SessionTokens};
use chat_service::{RoomHub, ServiceContext};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the session token signer from the service context
    pub fn session_tokens(&self) -> &SessionTokens {
        self.service_context.session_tokens()
    }

    /// Get the room event hub
    pub fn room_hub(&self) -> &RoomHub {
        self.service_context.room_hub()
    }

    /// Name of the session cookie
    pub fn cookie_name(&self) -> &str {
        &self.config.session.cookie_name
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .finish()
    }
}
