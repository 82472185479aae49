use actix_web::{web, HttpResponse};

use crate::dto::LoginRequest;
use crate::handlers::handle_domain_error;

use tally_core::repositories::UserRepository;
use tally_core::services::PasswordHasher;

use super::AppState;

/// Handler for POST /login
///
/// ## Success (200 OK)
/// ```json
/// { "token": "...", "token_type": "Bearer", "expires_in": 3600, "role": "client" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Wrong password
/// - 403 Forbidden: Account locked (`account_locked`) or locked by this
///   attempt (`account_locked_now`)
/// - 404 Not Found: Unknown username
pub async fn login<U, H>(
    state: web::Data<AppState<U, H>>,
    body: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher,
{
    match state
        .auth_service
        .login(&body.username, &body.password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => handle_domain_error(&error),
    }
}
