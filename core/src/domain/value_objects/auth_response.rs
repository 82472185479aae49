//! Authentication response value object returned by a successful login.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::UserRole;

/// Session token and metadata returned after a successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Signed session token
    pub token: String,

    /// Always "Bearer"
    pub token_type: String,

    /// Seconds until the token expires, `None` when it never does
    pub expires_in: Option<u64>,

    /// Role carried in the token
    pub role: UserRole,
}

impl AuthResponse {
    /// Creates a new bearer authentication response
    pub fn new(token: String, expires_in: Option<u64>, role: UserRole) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
            role,
        }
    }
}
