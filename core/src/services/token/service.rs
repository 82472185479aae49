//! Main token service implementation

use std::collections::HashSet;
use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::domain::entities::token::{Claims, Identity};
use crate::domain::entities::user::UserRole;
use crate::errors::{DomainError, DomainResult, TokenError};

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;

/// Service issuing and verifying stateless session tokens
///
/// Key material is derived once at construction and never changes.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Creates a new token service on the wall clock
    ///
    /// # Returns
    ///
    /// The service, or `DomainError::Internal` when the secret is empty
    pub fn new(config: TokenServiceConfig) -> DomainResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a new token service reading time from `clock`
    pub fn with_clock(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> DomainResult<Self> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::Internal {
                message: "Token signing secret must not be empty".to_string(),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked against the injected clock after the signature passes.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims = HashSet::new();

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        })
    }

    /// Token lifetime in seconds, `None` when tokens never expire
    pub fn ttl_seconds(&self) -> Option<u64> {
        self.config.ttl_seconds
    }

    /// Issues a signed session token for `username` with `role`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact JWT
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed
    pub fn issue(&self, username: &str, role: UserRole) -> DomainResult<String> {
        let claims = Claims::new_session(
            username,
            role,
            self.clock.now(),
            self.config.ttl_seconds,
            &self.config.issuer,
        );
        self.encode_jwt(&claims)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies a session token and returns its full claims
    ///
    /// Signature and issuer are checked before expiry, so a forged token is
    /// reported as invalid even when its claims are also stale.
    pub fn verify_claims(&self, token: &str) -> DomainResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(kind = ?e.kind(), "Session token rejected");
                DomainError::Token(TokenError::InvalidToken)
            })?;

        if token_data.claims.is_expired_at(self.clock.now()) {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }

        Ok(token_data.claims)
    }

    /// Verifies a session token and returns the identity it asserts
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - Username and role from a valid token
    /// * `Err(TokenError::InvalidToken)` - Malformed, tampered or foreign token
    /// * `Err(TokenError::TokenExpired)` - Valid signature, past its expiry
    pub fn verify(&self, token: &str) -> DomainResult<Identity> {
        self.verify_claims(token).map(|claims| claims.identity())
    }
}
