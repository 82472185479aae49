//! Configuration for the token service

use tally_shared::config::JwtConfig;

use crate::domain::entities::token::{DEFAULT_TOKEN_TTL_SECONDS, JWT_ISSUER};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HMAC signing secret; must not be empty
    pub jwt_secret: String,
    /// Token lifetime in seconds; `None` issues non-expiring tokens
    pub ttl_seconds: Option<u64>,
    /// Issuer claim written and required on verification
    pub issuer: String,
}

impl TokenServiceConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ttl_seconds: Some(DEFAULT_TOKEN_TTL_SECONDS),
            issuer: JWT_ISSUER.to_string(),
        }
    }

    pub fn with_ttl_seconds(mut self, ttl_seconds: Option<u64>) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            ttl_seconds: config.ttl_seconds,
            issuer: config.issuer.clone(),
        }
    }
}
