//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{Claims, Identity, DEFAULT_TOKEN_TTL_SECONDS, JWT_ISSUER};
pub use user::{BalanceLimits, User, UserRole, UserUpdate, MAX_USERNAME_LEN};
