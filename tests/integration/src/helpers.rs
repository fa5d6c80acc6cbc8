//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests
//! with a cookie-carrying client.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use chat_api::{create_app, create_app_state};
use chat_common::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, RealtimeConfig,
    ServerConfig, SessionConfig,
};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server against `DATABASE_URL`
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A fresh browser-like session: its own cookie store
    pub fn session(&self) -> Result<TestSession> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(TestSession {
            base_url: self.base_url(),
            client,
        })
    }

    /// A typed client with its own session
    pub fn chat_client(&self) -> Result<chat_client::ChatClient> {
        Ok(chat_client::ChatClient::new(&self.base_url())?)
    }
}

/// HTTP client holding one session cookie
pub struct TestSession {
    base_url: String,
    client: Client,
}

impl TestSession {
    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        Ok(self.client.post(&url).json(body).send().await?)
    }
}

/// Create a test configuration
///
/// Only `DATABASE_URL` is read from the environment.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL")?;

    Ok(AppConfig {
        app: AppSettings {
            name: "chat-rooms-it".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url,
            max_connections: 5,
            min_connections: 1,
        },
        session: SessionConfig {
            secret: "integration-test-secret".to_string(),
            cookie_name: "chat_session".to_string(),
            ttl_secs: 604_800,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        realtime: RealtimeConfig::default(),
    })
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
