use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::JwtError;
use super::settings::TokenSettings;

/// Signs access tokens with the process secret.
///
/// The encoding key is derived once at construction; issuing a token
/// performs no configuration lookups.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    lifetime: Duration,
}

impl TokenIssuer {
    pub const ALGORITHM: Algorithm = Algorithm::HS256;

    pub fn new(settings: &TokenSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.secret()),
            issuer: settings.issuer().to_string(),
            lifetime: settings.lifetime(),
        }
    }

    /// Issue a token for a subject, valid from now for the configured lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(&self, subject: &str, role: &str) -> Result<String, JwtError> {
        self.issue_at(subject, role, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        subject: &str,
        role: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(subject, role, &self.issuer, issued_at, self.lifetime);
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Self::ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        let settings =
            TokenSettings::new(b"my_secret_key_at_least_32_bytes_long!", "story-platform").unwrap();
        TokenIssuer::new(&settings)
    }

    #[test]
    fn test_issue_produces_three_segments() {
        let token = issuer().issue("user123", "reader").expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_issue_declares_hs256() {
        let token = issuer().issue("user123", "reader").unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
    }

    #[test]
    fn test_tokens_for_different_subjects_differ() {
        let issuer = issuer();
        let now = Utc::now();
        let first = issuer.issue_at("user1", "reader", now).unwrap();
        let second = issuer.issue_at("user2", "reader", now).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_issue_at_signs_expected_claims() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let token = issuer().issue_at("user123", "author", issued_at).unwrap();

        let mut validation = jsonwebtoken::Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let decoded = jsonwebtoken::decode::<Claims>(
            &token,
            &jsonwebtoken::DecodingKey::from_secret(b"my_secret_key_at_least_32_bytes_long!"),
            &validation,
        )
        .unwrap();

        assert_eq!(
            decoded.claims,
            Claims::new("user123", "author", "story-platform", issued_at, Duration::minutes(1440))
        );
    }
}
