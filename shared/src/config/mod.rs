//! Configuration module with business-specific sub-modules
//!
//! - `auth` - session token signing, password hashing and lockout policy
//! - `database` - optional MySQL connection pool configuration
//! - `environment` - environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, JwtConfig, LockoutConfig, PasswordConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting: {name}")]
    Missing { name: String },

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: String, value: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration; `None` selects the in-memory user store
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: None,
            auth: AuthConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Fails when a required setting is missing for the detected environment
    /// (the signing secret outside development) or a value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let auth = AuthConfig::from_env(environment)?;
        auth.validate(environment)?;

        Ok(Self {
            environment,
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env_optional()?,
            auth,
            logging: LoggingConfig::for_environment(environment),
        })
    }
}

/// Read an environment variable and parse it, falling back to `default` when unset
pub(crate) fn env_or<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name: name.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}
