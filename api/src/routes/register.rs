use actix_web::{web, HttpResponse};

use crate::dto::{MessageResponse, RegisterRequest};
use crate::handlers::handle_domain_error;

use tally_core::repositories::UserRepository;
use tally_core::services::PasswordHasher;

use super::AppState;

/// Handler for POST /register
///
/// ## Success (201 Created)
/// ```json
/// { "message": "User registered" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Unknown role, empty username or password
/// - 409 Conflict: Username already registered
pub async fn register<U, H>(
    state: web::Data<AppState<U, H>>,
    body: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher,
{
    let request = body.into_inner();
    match state
        .auth_service
        .register(&request.username, &request.password, &request.role)
        .await
    {
        Ok(_) => HttpResponse::Created().json(MessageResponse {
            message: "User registered".to_string(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}
