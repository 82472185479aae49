//! Shared configuration and common types for the Tally server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The error response structure returned by the HTTP layer

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, LockoutConfig,
    LoggingConfig, PasswordConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
