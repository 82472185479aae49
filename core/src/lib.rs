//! # Tally Core
//!
//! Core business logic for the Tally backend: credential verification with
//! failed-login lockout, signed session tokens, and the per-user balance
//! ledger. Transport and persistence technology live in sibling crates; this
//! crate only defines the domain, the repository interface and the services.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
