//! User entity: credentials, lockout state and balance of one account.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::AuthError;

const MAX_DECIMAL_SCALE: u32 = 28;

/// Longest username, in characters, a store must accept
pub const MAX_USERNAME_LEN: usize = 64;

/// Balances a store can hold exactly
///
/// `max_scale` is the number of fractional digits kept; `max_balance` the
/// largest representable value at that scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceLimits {
    pub max_balance: Decimal,
    pub max_scale: u32,
}

impl BalanceLimits {
    /// Limits of a SQL `DECIMAL(precision, scale)` column
    pub fn for_decimal_column(precision: u32, scale: u32) -> Self {
        let max_balance = 10i128
            .checked_pow(precision)
            .and_then(|bound| Decimal::try_from_i128_with_scale(bound - 1, scale).ok())
            .unwrap_or(Decimal::MAX);
        Self {
            max_balance,
            max_scale: scale.min(MAX_DECIMAL_SCALE),
        }
    }

    /// Whether `value` fits without rounding
    pub fn admits(&self, value: Decimal) -> bool {
        value <= self.max_balance && value.normalize().scale() <= self.max_scale
    }
}

impl Default for BalanceLimits {
    /// Everything `Decimal` can represent
    fn default() -> Self {
        Self {
            max_balance: Decimal::MAX,
            max_scale: MAX_DECIMAL_SCALE,
        }
    }
}

/// Role granted to a user at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Client,
    Operator,
    Administrator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Client => "client",
            UserRole::Operator => "operator",
            UserRole::Administrator => "administrator",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "client" => Ok(UserRole::Client),
            "operator" => Ok(UserRole::Operator),
            "administrator" | "admin" => Ok(UserRole::Administrator),
            _ => Err(AuthError::InvalidRole {
                role: s.to_string(),
            }),
        }
    }
}

/// User entity representing a registered account
///
/// `is_blocked` implies `failed_attempts` reached the lockout threshold, and
/// `balance` is never negative. Only the account lock service touches the
/// lock fields and only the ledger touches the balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique, immutable login name
    pub username: String,

    /// bcrypt digest of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: UserRole,

    /// Whether the account is locked out
    pub is_blocked: bool,

    /// Consecutive failed password checks since the last success
    pub failed_attempts: u32,

    pub balance: Decimal,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a freshly registered user: active, no failures, zero balance
    pub fn new(username: String, password_hash: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            username,
            password_hash,
            role,
            is_blocked: false,
            failed_attempts: 0,
            balance: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the set fields of `update` into this record
    pub fn apply(&mut self, update: &UserUpdate) {
        if let Some(failed_attempts) = update.failed_attempts {
            self.failed_attempts = failed_attempts;
        }
        if let Some(is_blocked) = update.is_blocked {
            self.is_blocked = is_blocked;
        }
        if let Some(balance) = update.balance {
            self.balance = balance;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update over the mutable fields of a `User`
///
/// Unset fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub failed_attempts: Option<u32>,
    pub is_blocked: Option<bool>,
    pub balance: Option<Decimal>,
}

impl UserUpdate {
    /// Successful login: back to zero failures
    pub fn reset_failures() -> Self {
        Self {
            failed_attempts: Some(0),
            ..Default::default()
        }
    }

    /// Failed login; `lock` marks the transition into the locked state
    pub fn record_failure(failed_attempts: u32, lock: bool) -> Self {
        Self {
            failed_attempts: Some(failed_attempts),
            is_blocked: lock.then_some(true),
            ..Default::default()
        }
    }

    pub fn set_balance(balance: Decimal) -> Self {
        Self {
            balance: Some(balance),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_user_creation() {
        let user = User::new("alice".to_string(), "hash".to_string(), UserRole::Client);

        assert_eq!(user.username, "alice");
        assert_eq!(user.role, UserRole::Client);
        assert!(!user.is_blocked);
        assert_eq!(user.failed_attempts, 0);
        assert_eq!(user.balance, Decimal::ZERO);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(UserRole::from_str("client").unwrap(), UserRole::Client);
        assert_eq!(UserRole::from_str(" Operator ").unwrap(), UserRole::Operator);
        assert_eq!(UserRole::from_str("ADMIN").unwrap(), UserRole::Administrator);
        assert_eq!(
            UserRole::from_str("root"),
            Err(AuthError::InvalidRole {
                role: "root".to_string()
            })
        );
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&UserRole::Administrator).unwrap();
        assert_eq!(json, "\"administrator\"");
        assert_eq!(UserRole::Operator.to_string(), "operator");
    }

    #[test]
    fn test_apply_merges_only_set_fields() {
        let mut user = User::new("bob".to_string(), "hash".to_string(), UserRole::Client);
        user.apply(&UserUpdate::set_balance(Decimal::new(50, 0)));
        user.apply(&UserUpdate::record_failure(2, false));

        assert_eq!(user.balance, Decimal::new(50, 0));
        assert_eq!(user.failed_attempts, 2);
        assert!(!user.is_blocked);

        user.apply(&UserUpdate::record_failure(3, true));
        assert!(user.is_blocked);
        assert_eq!(user.balance, Decimal::new(50, 0));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new("carol".to_string(), "secret-hash".to_string(), UserRole::Operator);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "operator");
    }


    #[test]
    fn test_decimal_column_limits() {
        let limits = BalanceLimits::for_decimal_column(28, 8);
        assert_eq!(
            limits.max_balance,
            Decimal::from_str("99999999999999999999.99999999").unwrap()
        );
        assert_eq!(limits.max_scale, 8);

        assert!(limits.admits(Decimal::from_str("100.12345678").unwrap()));
        assert!(limits.admits(Decimal::from_str("100.123456780000").unwrap()));
        assert!(!limits.admits(Decimal::from_str("0.000000001").unwrap()));
        assert!(!limits.admits(Decimal::from_str("100000000000000000000").unwrap()));
    }

    #[test]
    fn test_default_limits_are_unbounded() {
        let limits = BalanceLimits::default();
        assert!(limits.admits(Decimal::MAX));
        assert!(limits.admits(Decimal::from_str("0.0000000000000000000000000001").unwrap()));
    }
}
