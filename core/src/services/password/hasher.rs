//! One-way salted password hashing

use tracing::debug;

use crate::errors::{DomainError, DomainResult};

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Work factor used when none is configured
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Hashing capability used by registration and credential checks
///
/// Implementations are CPU-heavy by design; async callers should run them
/// on the blocking pool.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Produce a salted digest; two calls on the same input differ
    fn hash(&self, plaintext: &str) -> DomainResult<String>;

    /// Check `plaintext` against `digest`; a malformed digest is a mismatch
    fn verify(&self, plaintext: &str, digest: &str) -> bool;
}

/// bcrypt-based hasher with a configurable work factor
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given bcrypt cost (4..=31)
    pub fn new(cost: u32) -> DomainResult<Self> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(DomainError::Internal {
                message: format!("bcrypt cost {} out of range", cost),
            });
        }
        Ok(Self { cost })
    }

    /// Create a hasher, clamping `cost` into the valid range
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> DomainResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }

    fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::verify(plaintext, digest) {
            Ok(matches) => matches,
            Err(e) => {
                debug!(error = %e, "Stored password digest could not be parsed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = BcryptPasswordHasher::with_cost(4);
        let digest = hasher.hash("pw1").unwrap();

        assert!(hasher.verify("pw1", &digest));
        assert!(!hasher.verify("pw2", &digest));
    }

    #[test]
    fn test_salt_is_randomized() {
        let hasher = BcryptPasswordHasher::with_cost(4);
        let a = hasher.hash("same").unwrap();
        let b = hasher.hash("same").unwrap();

        assert_ne!(a, b);
        assert!(hasher.verify("same", &a));
        assert!(hasher.verify("same", &b));
    }

    #[test]
    fn test_malformed_digest_is_mismatch() {
        let hasher = BcryptPasswordHasher::with_cost(4);
        assert!(!hasher.verify("pw", ""));
        assert!(!hasher.verify("pw", "not-a-bcrypt-digest"));
        assert!(!hasher.verify("pw", "$2b$04$short"));
    }

    #[test]
    fn test_cost_bounds() {
        assert!(BcryptPasswordHasher::new(3).is_err());
        assert!(BcryptPasswordHasher::new(32).is_err());
        assert_eq!(BcryptPasswordHasher::new(10).unwrap().cost(), 10);
        assert_eq!(BcryptPasswordHasher::default().cost(), DEFAULT_BCRYPT_COST);
    }
}
