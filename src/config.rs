//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file, applies the
//! `PORT` environment override, and defines defaults for the listen address,
//! request body limit, logging and response headers. `AppConfig` is the root
//! configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

// =============================================================================
// HTTP Server Defaults
// =============================================================================

/// Default bind host (all interfaces)
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Default listen address, shown in `--help`
pub const DEFAULT_HTTP_ADDR: &str = formatcp!("{}:{}", DEFAULT_HTTP_HOST, DEFAULT_HTTP_PORT);

/// Maximum accepted request body in bytes (100 KiB)
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 100 * 1024;

/// Environment variable overriding `http.port`
pub const PORT_ENV_VAR: &str = "PORT";

/// Seconds to wait for in-flight requests after a shutdown signal
pub const GRACEFUL_SHUTDOWN_SECS: u64 = 30;

// =============================================================================
// HTTP Response Headers
// =============================================================================

/// Liveness probes must never be answered from a cache
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

/// Content type of every echo response, including the empty one
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Health check response body
pub const HEALTH_OK_BODY: &str = "OK";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Configuration file read when `--config` is not given (optional)
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Crate name as it appears in tracing targets
pub const CRATE_NAME: &str = env!("CARGO_CRATE_NAME");

/// Default log filter when neither `--log-level` nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = formatcp!("{}=info,tower_http=info", CRATE_NAME);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Largest request body accepted by `/echo` (larger bodies get 413)
    #[serde(default = "HttpServerConfig::default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            body_limit_bytes: Self::default_body_limit(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_body_limit() -> usize {
        DEFAULT_BODY_LIMIT_BYTES
    }

    /// Resolve `host:port` into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid http.host or http.port '{}:{}': {}",
                    self.host, self.port, e
                ))
            })
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load the file at `path` when given; otherwise fall back to
    /// `DEFAULT_CONFIG_PATH` if present, then to built-in defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the `PORT` environment variable, if set.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let port = std::env::var(PORT_ENV_VAR).ok();
        self.apply_port_override(port.as_deref())
    }

    /// Override `http.port` with a textual port value.
    pub fn apply_port_override(&mut self, value: Option<&str>) -> Result<(), ConfigError> {
        let Some(raw) = value else {
            return Ok(());
        };

        self.http.port = raw.trim().parse::<u16>().map_err(|_| {
            ConfigError::Validation(format!("{} must be a port number, got '{}'", PORT_ENV_VAR, raw))
        })?;

        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.body_limit_bytes == 0 {
            return Err(ConfigError::Validation(
                "http.body_limit_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
