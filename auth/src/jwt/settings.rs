use std::fmt;

use chrono::Duration;

use super::errors::JwtError;

/// Process-wide token configuration.
///
/// Built once at startup and shared read-only by the issuer and the
/// validator. The signing secret is never exposed through `Debug`.
#[derive(Clone)]
pub struct TokenSettings {
    secret: Vec<u8>,
    issuer: String,
    lifetime: Duration,
}

impl TokenSettings {
    /// Fixed token lifetime: one day.
    pub const LIFETIME_MINUTES: i64 = 1440;

    /// Create token settings.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret (at least 32 bytes recommended for HS256)
    /// * `issuer` - Value written to and required in the `iss` claim
    ///
    /// # Errors
    /// * `MissingSigningKey` - Secret is empty
    pub fn new(secret: impl AsRef<[u8]>, issuer: impl Into<String>) -> Result<Self, JwtError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(JwtError::MissingSigningKey);
        }

        Ok(Self {
            secret: secret.to_vec(),
            issuer: issuer.into(),
            lifetime: Duration::minutes(Self::LIFETIME_MINUTES),
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub(crate) fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}
