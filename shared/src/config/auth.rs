//! Authentication configuration: token signing, password hashing and lockout

use serde::{Deserialize, Serialize};

use super::{env_or, ConfigError, Environment};

const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// Session token (JWT) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret used to sign tokens
    pub secret: String,

    /// Seconds after issuance when a token stops verifying; `None` disables expiry
    #[serde(default = "default_ttl")]
    pub ttl_seconds: Option<u64>,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_SECRET),
            ttl_seconds: default_ttl(),
            issuer: default_issuer(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the token lifetime in seconds
    pub fn with_ttl_seconds(mut self, seconds: u64) -> Self {
        self.ttl_seconds = Some(seconds);
        self
    }

    /// Issue tokens that never expire
    pub fn without_expiry(mut self) -> Self {
        self.ttl_seconds = None;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

/// Failed-login lockout policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LockoutConfig {
    /// Consecutive failures that lock an account
    #[serde(default = "default_max_failed_attempts")]
    pub max_failed_attempts: u32,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: default_max_failed_attempts(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,

    /// Lockout policy
    #[serde(default)]
    pub lockout: LockoutConfig,
}

impl AuthConfig {
    /// Create from environment variables
    ///
    /// `JWT_SECRET` is required outside development. `JWT_TTL_SECONDS=0`
    /// disables token expiry.
    pub fn from_env(environment: Environment) -> Result<Self, ConfigError> {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if environment.is_development() => String::from(DEVELOPMENT_SECRET),
            Err(_) => {
                return Err(ConfigError::Missing {
                    name: "JWT_SECRET".to_string(),
                })
            }
        };

        let ttl = env_or("JWT_TTL_SECONDS", DEFAULT_TTL_SECONDS)?;
        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| default_issuer());

        Ok(Self {
            jwt: JwtConfig {
                secret,
                ttl_seconds: (ttl > 0).then_some(ttl),
                issuer,
            },
            password: PasswordConfig {
                bcrypt_cost: env_or("BCRYPT_COST", default_bcrypt_cost())?,
            },
            lockout: LockoutConfig {
                max_failed_attempts: env_or("MAX_FAILED_ATTEMPTS", default_max_failed_attempts())?,
            },
        })
    }

    /// Reject settings that cannot produce a working service
    pub fn validate(&self, environment: Environment) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Missing {
                name: "JWT_SECRET".to_string(),
            });
        }
        if environment.is_production() && self.jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid {
                name: "JWT_SECRET".to_string(),
                value: "<development default>".to_string(),
            });
        }
        if !(4..=31).contains(&self.password.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST".to_string(),
                value: self.password.bcrypt_cost.to_string(),
            });
        }
        if self.lockout.max_failed_attempts == 0 {
            return Err(ConfigError::Invalid {
                name: "MAX_FAILED_ATTEMPTS".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

const DEFAULT_TTL_SECONDS: u64 = 3600;

fn default_ttl() -> Option<u64> {
    Some(DEFAULT_TTL_SECONDS)
}

fn default_issuer() -> String {
    String::from("tally")
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_max_failed_attempts() -> u32 {
    3
}
