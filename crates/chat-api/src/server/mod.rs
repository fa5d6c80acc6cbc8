//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use chat_common::{AppConfig, AppError, SessionTokens};
use chat_db::{
    create_pool, run_migrations, PgMessageRepository, PgRoomRepository, PgUserRepository,
};
use chat_service::{RoomHub, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = create_router().merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = chat_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let session_tokens = Arc::new(SessionTokens::new(
        &config.session.secret,
        config.session.ttl_secs,
    ));

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let room_repo = Arc::new(PgRoomRepository::new(pool.clone()));
    let message_repo = Arc::new(PgMessageRepository::new(pool.clone()));

    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(user_repo)
        .room_repo(room_repo)
        .message_repo(message_repo)
        .session_tokens(session_tokens)
        .room_hub(RoomHub::new(config.realtime.event_buffer))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server on an already bound listener
pub async fn serve(app: Router, listener: TcpListener) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(app, listener).await
}
