use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::InvalidTokenReason;
use super::errors::JwtError;
use super::settings::TokenSettings;

/// Algorithms accepted in a token header. Anything outside the HMAC family
/// is refused before the signature is looked at.
const HMAC_FAMILY: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Verifies access tokens issued by this process.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    issuer: String,
}

impl TokenValidator {
    pub fn new(settings: &TokenSettings) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(settings.secret()),
            issuer: settings.issuer().to_string(),
        }
    }

    /// Validate a token against the current time.
    ///
    /// # Errors
    /// * `InvalidToken(Malformed)` - Not a decodable JWT or missing claims
    /// * `InvalidToken(UnexpectedAlgorithm)` - Header declares a non-HMAC algorithm
    /// * `InvalidToken(BadSignature)` - Signature does not match the process secret
    /// * `InvalidToken(Expired)` - `exp` is not in the future
    /// * `InvalidToken(BadIssuer)` - `iss` differs from the configured issuer
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate a token as if the current Unix time were `now`.
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        let header = decode_header(token).map_err(|_| InvalidTokenReason::Malformed)?;

        if !HMAC_FAMILY.contains(&header.alg) {
            return Err(InvalidTokenReason::UnexpectedAlgorithm.into());
        }

        // Signature and claim shape only; expiry and issuer are checked below
        // so each failure maps to its own reason.
        let mut validation = Validation::new(header.alg);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => InvalidTokenReason::BadSignature,
                ErrorKind::InvalidAlgorithm => InvalidTokenReason::UnexpectedAlgorithm,
                _ => InvalidTokenReason::Malformed,
            })?;

        if claims.is_expired(now) {
            return Err(InvalidTokenReason::Expired.into());
        }

        if claims.iss != self.issuer {
            return Err(InvalidTokenReason::BadIssuer.into());
        }

        Ok(claims)
    }
}
