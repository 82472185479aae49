//! Maps domain errors onto HTTP responses
//!
//! Every route funnels failures through `handle_domain_error`, so the
//! status table lives in exactly one place.

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};

use tally_core::errors::{AuthError, DomainError, LedgerError, TokenError};
use tally_shared::{error_codes, ErrorResponse};

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Auth(err) => match err {
            AuthError::DuplicateUsername => StatusCode::CONFLICT,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidCredentials | AuthError::InvalidRole { .. } => {
                StatusCode::BAD_REQUEST
            }
            AuthError::AccountLocked | AuthError::AccountLockedNow => StatusCode::FORBIDDEN,
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
        },
        DomainError::Token(err) => match err {
            TokenError::InvalidToken => StatusCode::FORBIDDEN,
            TokenError::TokenExpired => StatusCode::UNAUTHORIZED,
            TokenError::TokenGenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        },
        DomainError::Ledger(LedgerError::InvalidAmount | LedgerError::AmountTooLarge) => {
            StatusCode::BAD_REQUEST
        }
        DomainError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for(error: &DomainError) -> String {
    match error {
        DomainError::Auth(AuthError::DuplicateUsername) => "User already exists".to_string(),
        DomainError::Auth(AuthError::UserNotFound) => "User not found".to_string(),
        DomainError::Auth(AuthError::InvalidCredentials) => {
            "Invalid username or password".to_string()
        }
        DomainError::Auth(AuthError::AccountLocked) => "Account is locked".to_string(),
        DomainError::Auth(AuthError::AccountLockedNow) => {
            "Account locked after too many failed attempts".to_string()
        }
        DomainError::Auth(AuthError::InvalidRole { role }) => format!("Invalid role: {}", role),
        DomainError::Auth(AuthError::Unauthorized) => "Authentication required".to_string(),
        DomainError::Token(TokenError::InvalidToken) => "Invalid token".to_string(),
        DomainError::Token(TokenError::TokenExpired) => "Token has expired".to_string(),
        DomainError::Ledger(LedgerError::InvalidAmount) => {
            "Deposit amount must not be negative".to_string()
        }
        DomainError::Ledger(LedgerError::AmountTooLarge) => {
            "Deposit would overflow the balance".to_string()
        }
        DomainError::StoreUnavailable { .. } => {
            "Service temporarily unavailable, please retry".to_string()
        }
        // Internal details stay in the logs.
        DomainError::Token(TokenError::TokenGenerationFailed) | DomainError::Internal { .. } => {
            "An internal error occurred".to_string()
        }
    }
}

/// Convert a domain error into a JSON error response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);
    if status.is_server_error() {
        tracing::error!(error = %error, "Request failed");
    } else {
        tracing::debug!(error = %error, "Request rejected");
    }

    let mut body = ErrorResponse::new(error.error_code(), message_for(error));
    if error.is_retryable() {
        body = body.add_detail("retryable", true);
    }
    HttpResponse::build(status).json(body)
}

/// Error handler for malformed JSON bodies
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::BAD_REQUEST,
        format!("Invalid request body: {}", err),
    ));
    actix_web::error::InternalError::from_response(err, response).into()
}
