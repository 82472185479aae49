//! Domain-specific error types for authentication, tokens and the ledger
//!
//! Messages here are for logs; the transport layer owns the user-facing text.

use thiserror::Error;

/// Authentication and account errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username already registered")]
    DuplicateUsername,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The account was already locked before this attempt
    #[error("Account locked")]
    AccountLocked,

    /// This attempt exhausted the allowed failures and locked the account
    #[error("Account locked after repeated failed attempts")]
    AccountLockedNow,

    #[error("Invalid role: {role}")]
    InvalidRole { role: String },

    /// No session token was supplied where one is required
    #[error("Authentication required")]
    Unauthorized,
}

/// Session token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed, tampered or foreign-signed token
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Balance ledger errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Amount too large")]
    AmountTooLarge,
}
