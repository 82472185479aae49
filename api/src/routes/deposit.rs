use actix_web::{web, HttpResponse};

use crate::dto::{DepositRequest, DepositResponse};
use crate::handlers::handle_domain_error;
use crate::middleware::BearerToken;

use tally_core::repositories::UserRepository;
use tally_core::services::PasswordHasher;

use super::AppState;

/// Handler for POST /deposit
///
/// Requires `Authorization: Bearer {token}` and a body `{"value": <number>}`.
///
/// ## Errors
/// - 400 Bad Request: Negative amount or balance overflow
/// - 401 Unauthorized: Missing or expired token
/// - 403 Forbidden: Invalid token
pub async fn deposit<U, H>(
    state: web::Data<AppState<U, H>>,
    token: BearerToken,
    body: web::Json<DepositRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher,
{
    match state
        .auth_service
        .deposit_for_token(token.as_str(), body.value)
        .await
    {
        Ok(new_balance) => HttpResponse::Ok().json(DepositResponse {
            message: "Deposit successful".to_string(),
            new_balance,
        }),
        Err(error) => handle_domain_error(&error),
    }
}
