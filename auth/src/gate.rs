use std::sync::Arc;

use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::InvalidTokenReason;
use crate::jwt::JwtError;
use crate::jwt::TokenValidator;

/// Verified identity of the caller, valid for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub subject_id: String,
    pub role: String,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.sub,
            role: claims.role,
        }
    }
}

/// Terminal rejection state of the gate.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GateRejection {
    #[error("Missing Authorization header")]
    NoCredentials,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    MalformedHeader,

    #[error("Invalid token: {0}")]
    InvalidToken(InvalidTokenReason),
}

/// Admits or rejects a request from its `Authorization` header.
///
/// Start -> header absent -> `NoCredentials`
///       -> not `Bearer <token>` -> `MalformedHeader`
///       -> token refused -> `InvalidToken(reason)`
///       -> token accepted -> `AuthContext`
#[derive(Clone)]
pub struct AuthGate {
    validator: Arc<TokenValidator>,
}

impl AuthGate {
    pub fn new(validator: Arc<TokenValidator>) -> Self {
        Self { validator }
    }

    /// Run the gate over the raw header value, if any.
    pub fn admit(&self, authorization: Option<&str>) -> Result<AuthContext, GateRejection> {
        let header = authorization.ok_or(GateRejection::NoCredentials)?;
        let token = bearer_token(header)?;

        self.validator
            .validate(token)
            .map(AuthContext::from)
            .map_err(|e| match e {
                JwtError::InvalidToken(reason) => GateRejection::InvalidToken(reason),
                // Validation produces no other variant
                _ => GateRejection::InvalidToken(InvalidTokenReason::Malformed),
            })
    }
}

/// Extract the token from `Bearer <token>`.
///
/// The header must split on single spaces into exactly two parts, the
/// first being the literal `Bearer` and the second non-empty.
pub fn bearer_token(header: &str) -> Result<&str, GateRejection> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(GateRejection::MalformedHeader),
    }
}
