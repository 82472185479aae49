//! Business services containing domain logic and use cases.

pub mod auth;
pub mod ledger;
pub mod locks;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use auth::{AccountLockConfig, AccountLockService, AuthService, AuthServiceConfig, LockState};
pub use ledger::LedgerService;
pub use locks::{UserLockGuard, UserLocks};
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use token::{Clock, ManualClock, SystemClock, TokenService, TokenServiceConfig};
