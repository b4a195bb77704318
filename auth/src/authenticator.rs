use std::sync::Arc;

use crate::gate::AuthContext;
use crate::gate::AuthGate;
use crate::gate::GateRejection;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenSettings;
use crate::jwt::TokenValidator;
use crate::password::Argon2Hasher;
use crate::password::CredentialHasher;
use crate::password::PasswordError;
use crate::password::PasswordPolicy;
use crate::password::PolicyError;

/// Authentication coordinator combining the password policy, credential
/// hashing, token issuance and token validation.
///
/// Built once at startup from immutable settings and shared behind an `Arc`.
pub struct Authenticator {
    policy: PasswordPolicy,
    hasher: Box<dyn CredentialHasher>,
    issuer: TokenIssuer,
    gate: AuthGate,
    validator: Arc<TokenValidator>,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Policy(#[from] PolicyError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator using Argon2id for credentials.
    pub fn new(settings: &TokenSettings) -> Self {
        Self::with_hasher(settings, Box::new(Argon2Hasher::new()))
    }

    /// Create an authenticator with an explicit credential hasher.
    pub fn with_hasher(settings: &TokenSettings, hasher: Box<dyn CredentialHasher>) -> Self {
        let validator = Arc::new(TokenValidator::new(settings));
        Self {
            policy: PasswordPolicy::new(),
            hasher,
            issuer: TokenIssuer::new(settings),
            gate: AuthGate::new(Arc::clone(&validator)),
            validator,
        }
    }

    /// Check a new secret against the password policy.
    pub fn check_policy(&self, password: &str) -> Result<(), PolicyError> {
        self.policy.validate(password)
    }

    /// Enforce the password policy, then hash the secret for storage.
    ///
    /// CPU-intensive: async callers should run it on a blocking pool.
    ///
    /// # Errors
    /// * `Policy` - Secret violates the password policy
    /// * `PasswordError` - Hashing operation failed
    pub fn prepare_secret(&self, password: &str) -> Result<String, AuthenticationError> {
        self.policy.validate(password)?;
        Ok(self.hasher.hash(password)?)
    }

    /// Hash a secret without consulting the policy.
    ///
    /// CPU-intensive: async callers should run it on a blocking pool.
    pub fn hash_secret(&self, password: &str) -> Result<String, PasswordError> {
        self.hasher.hash(password)
    }

    /// Check a plaintext secret against a stored hash.
    ///
    /// CPU-intensive: async callers should run it on a blocking pool.
    pub fn verify_secret(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access token for the subject.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        role: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issuer.issue(subject, role)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    pub fn issue_token(&self, subject: &str, role: &str) -> Result<String, JwtError> {
        self.issuer.issue(subject, role)
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validator.validate(token)
    }

    /// Run the request gate over an `Authorization` header value.
    pub fn admit(&self, authorization: Option<&str>) -> Result<AuthContext, GateRejection> {
        self.gate.admit(authorization)
    }
}
