//! Application factory

use actix_web::{body::MessageBody, dev::ServiceResponse, middleware::Logger, web, App, HttpResponse};

use tally_core::repositories::UserRepository;
use tally_core::services::PasswordHasher;
use tally_shared::error_codes;
use tally_shared::ErrorResponse;

use crate::handlers::json_error_handler;
use crate::routes::{balance::balance, deposit::deposit, login::login, register::register, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<U, H>(
    app_state: web::Data<AppState<U, H>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    H: PasswordHasher,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .route("/register", web::post().to(register::<U, H>))
        .route("/login", web::post().to(login::<U, H>))
        .route("/balance", web::get().to(balance::<U, H>))
        .route("/deposit", web::post().to(deposit::<U, H>))
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "tally-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
