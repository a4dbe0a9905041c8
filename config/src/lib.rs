//! # Configuration Management for the subscription service
//!
//! This crate provides the configuration structures for the service:
//! database pool settings, the HTTP listener and logging.
//!
//! ## TOML File Configuration
//! ```toml
//! [database]
//! host = "localhost"
//! port = 5432
//! database = "subscriptions"
//! username = "postgres"
//! password = "password"
//! min_connections = 1
//! max_connections = 10
//! connection_timeout_seconds = 30
//! idle_timeout_seconds = 600
//! max_lifetime_seconds = 3600
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! request_timeout_seconds = 30
//! shutdown_timeout_seconds = 10
//!
//! [logging]
//! level = "info"
//! json = false
//! ```
//!
//! `PG_HOST`, `PG_PORT`, `PG_USER`, `PG_PASSWORD` and `REST_HOST` override
//! the file when set, so credentials can stay out of it.
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from the path in SUBSCRIPTION_CONFIG, or ./subscription.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path, time::Duration};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./subscription.toml";
const CONFIG_PATH_ENV: &str = "SUBSCRIPTION_CONFIG";

const PG_HOST_ENV: &str = "PG_HOST";
const PG_PORT_ENV: &str = "PG_PORT";
const PG_USER_ENV: &str = "PG_USER";
const PG_PASSWORD_ENV: &str = "PG_PASSWORD";
const REST_HOST_ENV: &str = "REST_HOST";

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_SHUTDOWN_TIMEOUT_SECONDS: u64 = 10;

fn default_request_timeout_seconds() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECONDS
}

fn default_shutdown_timeout_seconds() -> u64 {
    DEFAULT_SHUTDOWN_TIMEOUT_SECONDS
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
    pub max_lifetime_seconds: u64,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a single request, after which the client gets a 408
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
    /// How long graceful shutdown waits for in-flight requests
    #[serde(default = "default_shutdown_timeout_seconds")]
    pub shutdown_timeout_seconds: u64,
}

/// Logging configuration; `RUST_LOG` takes precedence over `level`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the TOML file named in the environment or the default path
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine, a malformed one is not
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err.into());
            }
        }

        let config_path = if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            config_path
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            DEFAULT_CONFIG_PATH.to_string()
        } else {
            return Err(ConfigError::Invalid(format!(
                "Config path must be specified as {} (environment or .env) or in {} file",
                CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH
            )));
        };

        let content = std::fs::read_to_string(config_path)?;
        Self::from_toml_str_with_env(&content, |name| env::var(name).ok())
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::from_toml_str_with_env(content, |_| None)
    }

    /// Parse TOML text, apply overrides from `lookup`, then validate
    ///
    /// `lookup` maps a variable name to its value; [`AppConfig::load`] passes
    /// the process environment.
    pub fn from_toml_str_with_env<F>(content: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content)?;
        config.apply_env_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(PG_HOST_ENV) {
            self.database.host = host;
        }
        if let Some(port) = lookup(PG_PORT_ENV) {
            self.database.port = port.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{} must be a port number, got '{}'", PG_PORT_ENV, port))
            })?;
        }
        if let Some(username) = lookup(PG_USER_ENV) {
            self.database.username = username;
        }
        if let Some(password) = lookup(PG_PASSWORD_ENV) {
            self.database.password = password;
        }
        if let Some(host) = lookup(REST_HOST_ENV) {
            self.server.host = host;
        }
        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        // Database validations
        if self.database.host.is_empty() {
            return Err(ConfigError::Invalid(
                "Database host cannot be empty".to_string(),
            ));
        }
        if self.database.port == 0 {
            return Err(ConfigError::Invalid(
                "Database port cannot be zero".to_string(),
            ));
        }
        if self.database.database.is_empty() {
            return Err(ConfigError::Invalid(
                "Database name cannot be empty".to_string(),
            ));
        }
        if self.database.username.is_empty() {
            return Err(ConfigError::Invalid(
                "Database username cannot be empty".to_string(),
            ));
        }
        if self.database.min_connections == 0 {
            return Err(ConfigError::Invalid(
                "Database min_connections must be greater than 0".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "Database max_connections must be greater than 0".to_string(),
            ));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid(
                "Database min_connections cannot be greater than max_connections".to_string(),
            ));
        }
        if self.database.connection_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "Database connection_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        // Server validations
        if self.server.host.is_empty() {
            return Err(ConfigError::Invalid(
                "Server host cannot be empty".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid(
                "Server port cannot be zero".to_string(),
            ));
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "Server request_timeout_seconds must be greater than 0".to_string(),
            ));
        }
        if self.server.shutdown_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "Server shutdown_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        // Logging validations
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Logging level cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Create a new database configuration
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        host: String,
        port: u16,
        database: String,
        username: String,
        password: String,
        min_connections: u32,
        max_connections: u32,
        connection_timeout_seconds: u64,
        idle_timeout_seconds: u64,
        max_lifetime_seconds: u64,
    ) -> Self {
        Self {
            host,
            port,
            database,
            username,
            password,
            min_connections,
            max_connections,
            connection_timeout_seconds,
            idle_timeout_seconds,
            max_lifetime_seconds,
        }
    }

    /// Build connection string
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            shutdown_timeout_seconds: DEFAULT_SHUTDOWN_TIMEOUT_SECONDS,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }

    /// `host:port` for the TCP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
