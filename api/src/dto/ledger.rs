use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Accepts the amount as a JSON number or a decimal string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositRequest {
    pub value: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositResponse {
    pub message: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub new_balance: Decimal,
}
