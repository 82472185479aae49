//! Configuration for the authentication service

use tally_shared::config::AuthConfig;

use super::account_lock::AccountLockConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone, Default)]
pub struct AuthServiceConfig {
    /// Lockout policy applied to credential checks
    pub lock: AccountLockConfig,
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            lock: AccountLockConfig {
                max_failed_attempts: config.lockout.max_failed_attempts,
            },
        }
    }
}
