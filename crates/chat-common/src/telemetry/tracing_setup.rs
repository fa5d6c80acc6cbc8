//! Tracing and logging setup
//!
//! Configures the `tracing` subscriber with environment-based filtering.
//! `RUST_LOG` overrides the configured level when set.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::Environment;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Log level filter (e.g., "info", "debug", "trace")
    pub level: Level,
    /// Enable JSON output format
    pub json: bool,
    /// Include span events (new, close)
    pub span_events: bool,
    /// Include file and line numbers
    pub file_line: bool,
    /// Include thread names
    pub thread_names: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
            span_events: false,
            file_line: true,
            thread_names: false,
        }
    }
}

impl TracingConfig {
    /// Create a development configuration with debug logging
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            json: false,
            span_events: true,
            file_line: true,
            thread_names: true,
        }
    }

    /// Create a production configuration with JSON logging
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            json: true,
            span_events: false,
            file_line: false,
            thread_names: false,
        }
    }

    /// Pick the preset matching a deployment environment
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
            Environment::Staging => Self::default(),
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let layer = fmt::layer()
            .with_file(self.file_line)
            .with_line_number(self.file_line)
            .with_thread_names(self.thread_names)
            .with_span_events(self.span_events());

        if self.json {
            layer.json().boxed()
        } else {
            layer.boxed()
        }
    }
}

/// Try to initialize tracing with custom configuration
///
/// Does not panic if a subscriber is already installed.
pub fn try_init_tracing_with_config(config: TracingConfig) -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    tracing_subscriber::registry()
        .with(config.fmt_layer())
        .with(env_filter)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
