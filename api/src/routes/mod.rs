//! Route handlers
//!
//! - `POST /register`, `POST /login`
//! - `GET /balance`, `POST /deposit` (Bearer token)

pub mod balance;
pub mod deposit;
pub mod login;
pub mod register;

use std::sync::Arc;

use tally_core::repositories::UserRepository;
use tally_core::services::{AuthService, PasswordHasher};

/// Application state that holds shared services
pub struct AppState<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub auth_service: Arc<AuthService<U, H>>,
}
