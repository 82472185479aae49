//! Token service module for session JWT management
//!
//! - Session token issuance (HS256) carrying username and role claims
//! - Verification: signature and issuer first, then expiry
//! - Injectable clock so expiry is testable

mod clock;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TokenServiceConfig;
pub use service::TokenService;
