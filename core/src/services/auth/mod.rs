//! Authentication service module
//!
//! - Registration with hashed passwords
//! - Credential checks guarded by the failed-login lockout state machine
//! - Session token issuance and authorization
//! - Balance operations for the authorized identity

mod account_lock;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use account_lock::{AccountLockConfig, AccountLockService, LockState};
pub use config::AuthServiceConfig;
pub use service::AuthService;
