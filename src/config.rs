//! Configuration module for taskdeck.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, TaskdeckError};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Trust `X-Forwarded-For` / `X-Real-IP` headers for client identity.
    ///
    /// Only enable when the server sits behind a reverse proxy that
    /// strips these headers from untrusted traffic.
    #[serde(default)]
    pub trusted_proxy: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            trusted_proxy: false,
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/taskdeck.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Token signing secret (required).
    #[serde(default)]
    pub jwt_secret: String,
    /// Token expiry in days.
    #[serde(default = "default_token_expiry_days")]
    pub token_expiry_days: u64,
    /// Out-of-band password reset secret.
    ///
    /// When unset, the reset-password route refuses all requests.
    #[serde(default)]
    pub reset_secret: Option<String>,
}

fn default_token_expiry_days() -> u64 {
    7
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_expiry_days: default_token_expiry_days(),
            reset_secret: None,
        }
    }
}

/// Rate limit configuration for all route classes.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitsConfig {
    /// General API window: max requests.
    #[serde(default = "default_general_max")]
    pub general_max: u32,
    /// General API window duration in seconds.
    #[serde(default = "default_general_window_secs")]
    pub general_window_secs: u64,
    /// Login window: max failed attempts.
    #[serde(default = "default_login_max")]
    pub login_max: u32,
    /// Login window duration in seconds.
    #[serde(default = "default_login_window_secs")]
    pub login_window_secs: u64,
    /// Registration window: max attempts.
    #[serde(default = "default_registration_max")]
    pub registration_max: u32,
    /// Registration window duration in seconds.
    #[serde(default = "default_registration_window_secs")]
    pub registration_window_secs: u64,
    /// Password reset window: max attempts.
    #[serde(default = "default_reset_max")]
    pub reset_max: u32,
    /// Password reset window duration in seconds.
    #[serde(default = "default_reset_window_secs")]
    pub reset_window_secs: u64,
}

fn default_general_max() -> u32 {
    100
}

fn default_general_window_secs() -> u64 {
    15 * 60
}

fn default_login_max() -> u32 {
    5
}

fn default_login_window_secs() -> u64 {
    60
}

fn default_registration_max() -> u32 {
    3
}

fn default_registration_window_secs() -> u64 {
    60 * 60
}

fn default_reset_max() -> u32 {
    5
}

fn default_reset_window_secs() -> u64 {
    60
}

impl Default for RateLimitsConfig {
    fn default() -> Self {
        Self {
            general_max: default_general_max(),
            general_window_secs: default_general_window_secs(),
            login_max: default_login_max(),
            login_window_secs: default_login_window_secs(),
            registration_max: default_registration_max(),
            registration_window_secs: default_registration_window_secs(),
            reset_max: default_reset_max(),
            reset_window_secs: default_reset_window_secs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file (empty string disables file logging).
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/taskdeck.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Rate limit configuration.
    #[serde(default)]
    pub rate_limits: RateLimitsConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(TaskdeckError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| TaskdeckError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `TASKDECK_JWT_SECRET`: Override the token signing secret
    /// - `TASKDECK_RESET_SECRET`: Override the password reset secret
    pub fn apply_env_overrides(&mut self) {
        if let Ok(jwt_secret) = std::env::var("TASKDECK_JWT_SECRET") {
            if !jwt_secret.is_empty() {
                self.auth.jwt_secret = jwt_secret;
            }
        }

        if let Ok(reset_secret) = std::env::var("TASKDECK_RESET_SECRET") {
            if !reset_secret.is_empty() {
                self.auth.reset_secret = Some(reset_secret);
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the token signing secret is not set. The
    /// server must not start without one.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(TaskdeckError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via the TASKDECK_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        Ok(())
    }
}
