//! Account lock service enforcing the failed-login lockout policy
//!
//! Each user is in one of two states:
//!
//! ```text
//!   Active(n) --match--------------------> Active(0)
//!   Active(n) --mismatch, n+1 < max------> Active(n+1)   InvalidCredentials
//!   Active(n) --mismatch, n+1 >= max-----> Locked        AccountLockedNow
//!   Locked    --any attempt--------------> Locked        AccountLocked
//! ```
//!
//! `Locked` is terminal: there is no time-based or manual unlock.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::user::{User, UserUpdate};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::locks::UserLocks;
use crate::services::password::PasswordHasher;

/// Configuration for account lock service
#[derive(Debug, Clone)]
pub struct AccountLockConfig {
    /// Consecutive failed attempts before locking (default: 3)
    pub max_failed_attempts: u32,
}

impl Default for AccountLockConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 3,
        }
    }
}

/// Lockout state of one account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// Accepting logins; carries the consecutive failure count
    Active { failed_attempts: u32 },
    Locked,
}

impl LockState {
    fn of(user: &User) -> Self {
        if user.is_blocked {
            LockState::Locked
        } else {
            LockState::Active {
                failed_attempts: user.failed_attempts,
            }
        }
    }
}

/// Service checking credentials and driving the lockout state machine
pub struct AccountLockService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    user_repository: Arc<U>,
    hasher: Arc<H>,
    locks: UserLocks,
    config: AccountLockConfig,
}

impl<U, H> AccountLockService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Create a new account lock service
    ///
    /// `locks` should be the registry shared with every other service that
    /// writes the same user records.
    pub fn new(
        user_repository: Arc<U>,
        hasher: Arc<H>,
        locks: UserLocks,
        config: AccountLockConfig,
    ) -> Self {
        Self {
            user_repository,
            hasher,
            locks,
            config,
        }
    }

    /// Check `password` for `username`, applying the lockout policy
    ///
    /// # Returns
    /// * `Ok(User)` - Password matched; failure counter is zero
    /// * `Err(AuthError::UserNotFound)` - Unknown username
    /// * `Err(AuthError::AccountLocked)` - Account was already locked
    /// * `Err(AuthError::AccountLockedNow)` - This failure locked the account
    /// * `Err(AuthError::InvalidCredentials)` - Mismatch, still below the threshold
    pub async fn check_credentials(&self, username: &str, password: &str) -> DomainResult<User> {
        let _guard = self.locks.acquire(username).await;

        let user = self
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        if let LockState::Locked = LockState::of(&user) {
            warn!(username = username, "Login attempt on locked account");
            return Err(DomainError::Auth(AuthError::AccountLocked));
        }

        if self.verify_password(password, &user.password_hash).await? {
            if user.failed_attempts == 0 {
                return Ok(user);
            }
            let user = self
                .user_repository
                .update(username, UserUpdate::reset_failures())
                .await?;
            info!(
                username = username,
                "Failed attempt counter reset after successful authentication"
            );
            return Ok(user);
        }

        let attempts = user.failed_attempts.saturating_add(1);
        let lock = attempts >= self.config.max_failed_attempts;
        self.user_repository
            .update(username, UserUpdate::record_failure(attempts, lock))
            .await?;

        warn!(
            username = username,
            attempts = attempts,
            max_attempts = self.config.max_failed_attempts,
            "Failed authentication attempt recorded"
        );

        if lock {
            warn!(username = username, "Account locked due to failed authentication attempts");
            Err(DomainError::Auth(AuthError::AccountLockedNow))
        } else {
            Err(DomainError::Auth(AuthError::InvalidCredentials))
        }
    }

    /// Current lockout state of `username`
    pub async fn lock_state(&self, username: &str) -> DomainResult<LockState> {
        let user = self
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;
        Ok(LockState::of(&user))
    }

    pub fn max_failed_attempts(&self) -> u32 {
        self.config.max_failed_attempts
    }

    async fn verify_password(&self, password: &str, digest: &str) -> DomainResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let digest = digest.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })
    }
}
