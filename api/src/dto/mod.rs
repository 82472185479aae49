//! Request and response bodies

pub mod auth;
pub mod ledger;

pub use auth::{LoginRequest, MessageResponse, RegisterRequest};
pub use ledger::{BalanceResponse, DepositRequest, DepositResponse};
