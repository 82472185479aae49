//! In-memory implementation of UserRepository
//!
//! Backs the service when no database is configured, and the test suites.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{BalanceLimits, User, UserUpdate};
use crate::errors::{AuthError, DomainError};

use super::r#trait::UserRepository;

/// User store keeping records in a process-local map
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
    limits: BalanceLimits,
}

impl InMemoryUserRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository mimicking a store with narrower balance storage
    pub fn with_balance_limits(limits: BalanceLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.username) {
            return Err(DomainError::Auth(AuthError::DuplicateUsername));
        }

        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn update(&self, username: &str, update: UserUpdate) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        let user = users
            .get_mut(username)
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;
        user.apply(&update);
        Ok(user.clone())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let users = self.users.read().await;
        Ok(users.len() as u64)
    }

    fn balance_limits(&self) -> BalanceLimits {
        self.limits
    }
}
