//! Main authentication service implementation
//!
//! The only surface the transport layer calls. Identity flows explicitly:
//! `authorize` returns an `Identity`, and ledger operations take one.

use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::domain::entities::token::Identity;
use crate::domain::entities::user::{User, UserRole, MAX_USERNAME_LEN};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::ledger::LedgerService;
use crate::services::locks::UserLocks;
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;

use super::account_lock::{AccountLockService, LockState};
use super::config::AuthServiceConfig;

/// Authentication facade composing lockout, tokens and the ledger
pub struct AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// User repository for registration
    user_repository: Arc<U>,
    /// Password hasher for registration
    hasher: Arc<H>,
    /// Credential checks and lockout
    account_lock: AccountLockService<U, H>,
    /// Session token issuance and verification
    token_service: Arc<TokenService>,
    /// Balance operations
    ledger: LedgerService<U>,
}

impl<U, H> AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Store owning the user records
    /// * `hasher` - Password hasher used for registration and login
    /// * `token_service` - Session token service
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        hasher: Arc<H>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        // Login and deposit serialize on the same per-user locks.
        let locks = UserLocks::new();
        Self {
            account_lock: AccountLockService::new(
                user_repository.clone(),
                hasher.clone(),
                locks.clone(),
                config.lock,
            ),
            ledger: LedgerService::new(user_repository.clone(), locks),
            user_repository,
            hasher,
            token_service,
        }
    }

    /// Register a new user
    ///
    /// The username is trimmed; an empty or overlong username, or an empty
    /// password, is rejected as invalid credentials.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created user (active, zero balance)
    /// * `Err(AuthError::InvalidRole)` - `role` is not a known role
    /// * `Err(AuthError::DuplicateUsername)` - Username already registered
    pub async fn register(&self, username: &str, password: &str, role: &str) -> DomainResult<User> {
        let username = username.trim();
        if username.is_empty()
            || username.chars().count() > MAX_USERNAME_LEN
            || password.is_empty()
        {
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }
        let role = UserRole::from_str(role)?;

        let password_hash = self.hash_password(password).await?;
        let user = self
            .user_repository
            .create(User::new(username.to_string(), password_hash, role))
            .await?;

        info!(username = %user.username, role = %user.role, "New user registered");
        Ok(user)
    }

    /// Check credentials and issue a session token
    ///
    /// The username is trimmed the same way as at registration.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Token and its metadata
    /// * `Err(AuthError::UserNotFound)` - Unknown username
    /// * `Err(AuthError::AccountLocked)` - Account already locked
    /// * `Err(AuthError::AccountLockedNow)` - This attempt locked the account
    /// * `Err(AuthError::InvalidCredentials)` - Wrong password
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<AuthResponse> {
        let user = self
            .account_lock
            .check_credentials(username.trim(), password)
            .await?;
        let token = self.token_service.issue(&user.username, user.role)?;

        info!(username = %user.username, "User authenticated");
        Ok(AuthResponse::new(
            token,
            self.token_service.ttl_seconds(),
            user.role,
        ))
    }

    /// Verify a session token
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - Username and role asserted by the token
    /// * `Err(AuthError::Unauthorized)` - No token supplied
    /// * `Err(TokenError::InvalidToken)` - Malformed or tampered token
    /// * `Err(TokenError::TokenExpired)` - Token past its expiry
    pub fn authorize(&self, token: &str) -> DomainResult<Identity> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DomainError::Auth(AuthError::Unauthorized));
        }
        self.token_service.verify(token)
    }

    /// Balance of the authorized identity
    pub async fn get_balance(&self, identity: &Identity) -> DomainResult<Decimal> {
        self.ledger.get_balance(&identity.username).await
    }

    /// Deposit into the authorized identity's balance
    pub async fn deposit(&self, identity: &Identity, amount: Decimal) -> DomainResult<Decimal> {
        self.ledger.deposit(&identity.username, amount).await
    }

    /// Authorize `token`, then read the balance
    pub async fn balance_for_token(&self, token: &str) -> DomainResult<Decimal> {
        let identity = self.authorize(token)?;
        self.get_balance(&identity).await
    }

    /// Authorize `token`, then deposit
    pub async fn deposit_for_token(&self, token: &str, amount: Decimal) -> DomainResult<Decimal> {
        let identity = self.authorize(token)?;
        self.deposit(&identity, amount).await
    }

    /// Lockout state of `username`
    pub async fn lock_state(&self, username: &str) -> DomainResult<LockState> {
        self.account_lock.lock_state(username).await
    }

    async fn hash_password(&self, password: &str) -> DomainResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
    }
}
