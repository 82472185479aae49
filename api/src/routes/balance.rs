use actix_web::{web, HttpResponse};

use crate::dto::BalanceResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::BearerToken;

use tally_core::repositories::UserRepository;
use tally_core::services::PasswordHasher;

use super::AppState;

/// Handler for GET /balance
///
/// Requires `Authorization: Bearer {token}`.
pub async fn balance<U, H>(state: web::Data<AppState<U, H>>, token: BearerToken) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher,
{
    match state.auth_service.balance_for_token(token.as_str()).await {
        Ok(balance) => HttpResponse::Ok().json(BalanceResponse { balance }),
        Err(error) => handle_domain_error(&error),
    }
}
