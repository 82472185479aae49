//! Session token claims and the identity they assert.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRole;

/// Default session token lifetime (1 hour)
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 3600;

/// Default JWT issuer
pub const JWT_ISSUER: &str = "tally";

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    pub role: UserRole,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp; absent when tokens never expire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims for a session token issued at `issued_at`
    ///
    /// # Arguments
    ///
    /// * `username` - Subject of the token
    /// * `role` - Role claim carried alongside the subject
    /// * `issued_at` - Unix timestamp of issuance
    /// * `ttl_seconds` - Lifetime; `None` leaves `exp` unset
    /// * `issuer` - Issuer claim
    pub fn new_session(
        username: &str,
        role: UserRole,
        issued_at: i64,
        ttl_seconds: Option<u64>,
        issuer: &str,
    ) -> Self {
        Self {
            sub: username.to_string(),
            role,
            iat: issued_at,
            exp: ttl_seconds.map(|ttl| issued_at.saturating_add(ttl.min(i64::MAX as u64) as i64)),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Whether the token is expired at `now`
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.map_or(false, |exp| now >= exp)
    }

    /// Identity asserted by these claims
    pub fn identity(&self) -> Identity {
        Identity {
            username: self.sub.clone(),
            role: self.role,
        }
    }
}

/// Verified (username, role) pair produced by token verification
///
/// Ledger operations are keyed by `username` of the identity passed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub role: UserRole,
}
