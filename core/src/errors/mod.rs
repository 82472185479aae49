//! Domain error taxonomy and error handling.

mod types;


pub use types::{AuthError, LedgerError, TokenError};

use tally_shared::error_codes;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The user store could not be reached; safe for the caller to retry
    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl DomainError {
    /// Whether the caller may retry the same operation unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::StoreUnavailable { .. })
    }

    /// Stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::StoreUnavailable { .. } => error_codes::STORE_UNAVAILABLE,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Auth(err) => match err {
                AuthError::DuplicateUsername => error_codes::DUPLICATE_USERNAME,
                AuthError::UserNotFound => error_codes::NOT_FOUND,
                AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
                AuthError::AccountLocked => error_codes::ACCOUNT_LOCKED,
                AuthError::AccountLockedNow => error_codes::ACCOUNT_LOCKED_NOW,
                AuthError::InvalidRole { .. } => error_codes::INVALID_ROLE,
                AuthError::Unauthorized => error_codes::UNAUTHORIZED,
            },
            DomainError::Token(err) => match err {
                TokenError::InvalidToken => error_codes::INVALID_TOKEN,
                TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
                TokenError::TokenGenerationFailed => error_codes::INTERNAL_ERROR,
            },
            DomainError::Ledger(err) => match err {
                LedgerError::InvalidAmount => error_codes::INVALID_AMOUNT,
                LedgerError::AmountTooLarge => error_codes::AMOUNT_TOO_LARGE,
            },
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
