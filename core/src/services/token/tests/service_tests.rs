//! Unit tests for the token service

use std::sync::Arc;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::UserRole;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{ManualClock, TokenService, TokenServiceConfig};

const START: i64 = 1_700_000_000;

fn service_with_clock(ttl: Option<u64>) -> (TokenService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(START));
    let config = TokenServiceConfig::new("test-secret").with_ttl_seconds(ttl);
    let service = TokenService::with_clock(config, clock.clone()).unwrap();
    (service, clock)
}

#[test]
fn test_issue_and_verify_round_trip() {
    let (service, _) = service_with_clock(Some(60));

    let token = service.issue("alice", UserRole::Operator).unwrap();
    let identity = service.verify(&token).unwrap();

    assert_eq!(identity.username, "alice");
    assert_eq!(identity.role, UserRole::Operator);

    let claims = service.verify_claims(&token).unwrap();
    assert_eq!(claims.iat, START);
    assert_eq!(claims.exp, Some(START + 60));
}

#[test]
fn test_empty_secret_rejected() {
    let result = TokenService::new(TokenServiceConfig::new(""));
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[test]
fn test_expired_token() {
    let (service, clock) = service_with_clock(Some(60));
    let token = service.issue("alice", UserRole::Client).unwrap();

    clock.advance(59);
    assert!(service.verify(&token).is_ok());

    clock.advance(1);
    assert_eq!(
        service.verify(&token).unwrap_err(),
        DomainError::Token(TokenError::TokenExpired)
    );
}

#[test]
fn test_no_expiry_when_ttl_disabled() {
    let (service, clock) = service_with_clock(None);
    let token = service.issue("bob", UserRole::Client).unwrap();

    clock.advance(10 * 365 * 24 * 3600);
    assert!(service.verify(&token).is_ok());
    assert_eq!(service.ttl_seconds(), None);
}

#[test]
fn test_tampered_signature_is_invalid() {
    let (service, _) = service_with_clock(Some(60));
    let token = service.issue("alice", UserRole::Client).unwrap();

    let (head, signature) = token.rsplit_once('.').unwrap();
    let mut chars: Vec<char> = signature.chars().collect();
    chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
    let tampered = format!("{}.{}", head, chars.into_iter().collect::<String>());

    assert_eq!(
        service.verify(&tampered).unwrap_err(),
        DomainError::Token(TokenError::InvalidToken)
    );
}

#[test]
fn test_tampered_payload_is_invalid() {
    let (service, _) = service_with_clock(Some(60));
    let alice = service.issue("alice", UserRole::Client).unwrap();
    let admin = service.issue("mallory", UserRole::Administrator).unwrap();

    // Splice mallory's payload under alice's signature.
    let alice_parts: Vec<&str> = alice.split('.').collect();
    let admin_parts: Vec<&str> = admin.split('.').collect();
    let spliced = format!("{}.{}.{}", alice_parts[0], admin_parts[1], alice_parts[2]);

    assert_eq!(
        service.verify(&spliced).unwrap_err(),
        DomainError::Token(TokenError::InvalidToken)
    );
}

#[test]
fn test_foreign_secret_is_invalid() {
    let (service, _) = service_with_clock(Some(60));
    let other = TokenService::new(TokenServiceConfig::new("other-secret")).unwrap();
    let token = other.issue("alice", UserRole::Client).unwrap();

    assert_eq!(
        service.verify(&token).unwrap_err(),
        DomainError::Token(TokenError::InvalidToken)
    );
}

#[test]
fn test_forged_and_expired_reports_invalid() {
    let (service, clock) = service_with_clock(Some(60));
    let other = TokenService::with_clock(
        TokenServiceConfig::new("other-secret").with_ttl_seconds(Some(1)),
        clock.clone(),
    )
    .unwrap();
    let token = other.issue("alice", UserRole::Client).unwrap();
    clock.advance(3600);

    assert_eq!(
        service.verify(&token).unwrap_err(),
        DomainError::Token(TokenError::InvalidToken)
    );
}

#[test]
fn test_wrong_issuer_is_invalid() {
    let (service, _) = service_with_clock(Some(60));
    let mut claims = Claims::new_session("alice", UserRole::Client, START, Some(60), "someone-else");
    claims.iss = "someone-else".to_string();
    let token = service.encode_jwt(&claims).unwrap();

    assert_eq!(
        service.verify(&token).unwrap_err(),
        DomainError::Token(TokenError::InvalidToken)
    );
}

#[test]
fn test_malformed_input_never_panics() {
    let (service, _) = service_with_clock(Some(60));

    for input in ["", ".", "..", "not-a-jwt", "a.b.c", "\u{0}\u{1}", "Bearer abc.def.ghi"] {
        assert_eq!(
            service.verify(input).unwrap_err(),
            DomainError::Token(TokenError::InvalidToken),
            "input {:?}",
            input
        );
    }
}
