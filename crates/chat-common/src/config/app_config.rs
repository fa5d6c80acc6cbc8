//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub cors: CorsConfig,
    pub realtime: RealtimeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Parse an `APP_ENV` value, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Lifetime of both the signed token and the cookie, in seconds
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: i64,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Room event stream configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// Per-room broadcast buffer; subscribers further behind get a resync
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            event_buffer: default_event_buffer(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "chat-rooms".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_cookie_name() -> String {
    "chat_session".to_string()
}

fn default_session_ttl() -> i64 {
    604_800 // 7 days
}

fn default_event_buffer() -> usize {
    256
}

/// Parse an optional numeric variable, rejecting garbage instead of ignoring it
fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(None),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    /// or a numeric variable does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let env_name = env::var("APP_ENV").ok();
        let app_env = match env_name.as_deref() {
            Some(raw) => Environment::parse(raw)
                .ok_or_else(|| ConfigError::InvalidValue("APP_ENV", raw.to_string()))?,
            None => default_env(),
        };

        let secret = env::var("SESSION_SECRET").map_err(|_| ConfigError::MissingVar("SESSION_SECRET"))?;
        if secret.trim().is_empty() {
            return Err(ConfigError::InvalidValue("SESSION_SECRET", String::new()));
        }

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: app_env,
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: parse_var("API_PORT")?.unwrap_or_else(default_port),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
            },
            session: SessionConfig {
                secret,
                cookie_name: env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| default_cookie_name()),
                ttl_secs: parse_var("SESSION_TTL_SECS")?.unwrap_or_else(default_session_ttl),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            realtime: RealtimeConfig {
                event_buffer: parse_var("ROOM_EVENT_BUFFER")?.unwrap_or_else(default_event_buffer),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
