//! Bearer token extraction
//!
//! Extraction never fails: a missing or non-Bearer `Authorization` header
//! yields an empty token, which the auth service rejects as unauthorized.
//! Verification itself stays in `AuthService::authorize`.

use actix_web::{dev::Payload, http::header::AUTHORIZATION, FromRequest, HttpRequest};
use std::future::{ready, Ready};

/// Raw session token taken from `Authorization: Bearer <token>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Extracts Bearer token from Authorization header
///
/// The scheme name is matched case-insensitively.
pub fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim().to_string())
}

impl FromRequest for BearerToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(BearerToken(extract_bearer_token(req).unwrap_or_default())))
    }
}
