//! Database configuration module

use serde::{Deserialize, Serialize};

use super::{env_or, ConfigError};

/// Database configuration for the MySQL user store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("mysql://localhost:3306/tally"),
            max_connections: 10,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables when `DATABASE_URL` is set
    pub fn from_env_optional() -> Result<Option<Self>, ConfigError> {
        let url = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => return Ok(None),
        };

        Ok(Some(Self {
            url,
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10)?,
            connect_timeout: env_or("DATABASE_CONNECT_TIMEOUT", 30)?,
            ..Default::default()
        }))
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_builder() {
        let config = DatabaseConfig::new("mysql://db:3306/tally").with_max_connections(25);
        assert_eq!(config.url, "mysql://db:3306/tally");
        assert_eq!(config.max_connections, 25);
        assert_eq!(config.connect_timeout, 30);
    }
}
