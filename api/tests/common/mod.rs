//! Shared fixtures for HTTP tests

use actix_web::web;
use std::sync::Arc;

use tally_api::AppState;
use tally_core::repositories::InMemoryUserRepository;
use tally_core::services::{
    AuthService, AuthServiceConfig, BcryptPasswordHasher, ManualClock, TokenService,
    TokenServiceConfig,
};

const NOW: i64 = 1_700_000_000;

pub type TestState = AppState<InMemoryUserRepository, BcryptPasswordHasher>;

pub fn app_state(ttl: Option<u64>) -> (web::Data<TestState>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(NOW));
    let token_service = TokenService::with_clock(
        TokenServiceConfig::new("http-test-secret").with_ttl_seconds(ttl),
        clock.clone(),
    )
    .unwrap();

    let auth_service = Arc::new(AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(BcryptPasswordHasher::with_cost(4)),
        Arc::new(token_service),
        AuthServiceConfig::default(),
    ));

    (web::Data::new(AppState { auth_service }), clock)
}
