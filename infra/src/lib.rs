//! # Infrastructure Layer
//!
//! Concrete persistence for the Tally backend. The core crate defines the
//! `UserRepository` interface; this crate provides the MySQL implementation
//! on top of a `sqlx` connection pool.
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use tally_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlUserRepository, PoolStatistics};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(e) => DomainError::StoreUnavailable {
                message: e.to_string(),
            },
            InfrastructureError::Config(message) => DomainError::Internal { message },
        }
    }
}
