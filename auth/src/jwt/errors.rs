use std::fmt;

use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing key is missing or empty")]
    MissingSigningKey,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid token: {0}")]
    InvalidToken(InvalidTokenReason),
}

/// Why a presented token was refused.
///
/// Display output names the rule only and never carries key material
/// or decoder internals, so it is safe to return to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTokenReason {
    Malformed,
    UnexpectedAlgorithm,
    BadSignature,
    Expired,
    BadIssuer,
}

impl InvalidTokenReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidTokenReason::Malformed => "malformed",
            InvalidTokenReason::UnexpectedAlgorithm => "unexpected algorithm",
            InvalidTokenReason::BadSignature => "bad signature",
            InvalidTokenReason::Expired => "expired",
            InvalidTokenReason::BadIssuer => "bad issuer",
        }
    }
}

impl fmt::Display for InvalidTokenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<InvalidTokenReason> for JwtError {
    fn from(reason: InvalidTokenReason) -> Self {
        JwtError::InvalidToken(reason)
    }
}
