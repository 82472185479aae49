//! Ledger service: balance reads and deposits

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

use crate::domain::entities::user::UserUpdate;
use crate::errors::{AuthError, DomainError, DomainResult, LedgerError};
use crate::repositories::UserRepository;
use crate::services::locks::UserLocks;

/// Service reading and mutating user balances
pub struct LedgerService<U>
where
    U: UserRepository,
{
    user_repository: Arc<U>,
    locks: UserLocks,
}

impl<U> LedgerService<U>
where
    U: UserRepository,
{
    /// Create a new ledger service sharing `locks` with the account lock service
    pub fn new(user_repository: Arc<U>, locks: UserLocks) -> Self {
        Self {
            user_repository,
            locks,
        }
    }

    /// Current balance of `username`
    pub async fn get_balance(&self, username: &str) -> DomainResult<Decimal> {
        self.user_repository
            .find_by_username(username)
            .await?
            .map(|user| user.balance)
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }

    /// Add `amount` to the balance of `username`
    ///
    /// # Returns
    /// * `Ok(Decimal)` - The balance after the deposit
    /// * `Err(LedgerError::InvalidAmount)` - `amount` is negative, or has more
    ///   fractional digits than the store keeps
    /// * `Err(LedgerError::AmountTooLarge)` - The sum exceeds what the store holds
    /// * `Err(AuthError::UserNotFound)` - Unknown username
    pub async fn deposit(&self, username: &str, amount: Decimal) -> DomainResult<Decimal> {
        let limits = self.user_repository.balance_limits();
        let amount = amount.normalize();
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::Ledger(LedgerError::InvalidAmount));
        }
        if amount.scale() > limits.max_scale {
            return Err(DomainError::Ledger(LedgerError::InvalidAmount));
        }

        let _guard = self.locks.acquire(username).await;

        let current = self.get_balance(username).await?;
        let new_balance = current
            .checked_add(amount)
            .filter(|balance| limits.admits(*balance))
            .ok_or(DomainError::Ledger(LedgerError::AmountTooLarge))?;

        if amount.is_zero() {
            return Ok(current);
        }

        let user = self
            .user_repository
            .update(username, UserUpdate::set_balance(new_balance))
            .await?;

        info!(
            username = username,
            amount = %amount,
            balance = %user.balance,
            "Deposit applied"
        );

        Ok(user.balance)
    }
}
