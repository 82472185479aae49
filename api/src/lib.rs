//! HTTP transport for the Tally backend
//!
//! Exposes registration, login and the balance ledger over actix-web.
//! All business rules live in `tally_core`; handlers only translate
//! between JSON and the core service calls.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::AppState;
