//! User repository trait defining the interface for user record persistence.
//!
//! The repository exclusively owns user records. Services never mutate a
//! `User` they have read and write it back whole; they send a `UserUpdate`
//! naming only the fields they own, and the store merges it atomically.

use async_trait::async_trait;

use crate::domain::entities::user::{BalanceLimits, User, UserUpdate};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations map connectivity failures to
/// `DomainError::StoreUnavailable` so callers can retry.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use tally_core::domain::entities::user::{User, UserUpdate};
/// use tally_core::errors::DomainError;
/// use tally_core::repositories::UserRepository;
///
/// struct RemoteUserRepository {
///     // client handle
/// }
///
/// #[async_trait]
/// impl UserRepository for RemoteUserRepository {
///     async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn create(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn update(&self, username: &str, update: UserUpdate) -> Result<User, DomainError> { unimplemented!() }
/// #   async fn count(&self) -> Result<u64, DomainError> { Ok(0) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by username
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that username
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Auth(AuthError::DuplicateUsername))` - Username taken
    /// * `Err(DomainError)` - Store error occurred
    ///
    /// # Example
    /// ```no_run
    /// # use tally_core::repositories::UserRepository;
    /// # use tally_core::domain::entities::user::{User, UserRole};
    /// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let user = User::new("alice".to_string(), "$2b$10$...".to_string(), UserRole::Client);
    /// let created = repo.create(user).await?;
    /// println!("Created {}", created.username);
    /// # Ok(())
    /// # }
    /// ```
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Atomically merge `update` into the stored record
    ///
    /// No reader observes a record with only part of the update applied.
    ///
    /// # Returns
    /// * `Ok(User)` - The record after the merge
    /// * `Err(DomainError::Auth(AuthError::UserNotFound))` - No such user
    /// * `Err(DomainError)` - Store error occurred
    async fn update(&self, username: &str, update: UserUpdate) -> Result<User, DomainError>;

    /// Count stored users
    async fn count(&self) -> Result<u64, DomainError>;

    /// Balances this store keeps without overflow or rounding
    fn balance_limits(&self) -> BalanceLimits {
        BalanceLimits::default()
    }
}
