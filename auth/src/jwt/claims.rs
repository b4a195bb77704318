use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by access tokens.
///
/// Every field is mandatory: a token missing any of them does not
/// deserialize and is refused as malformed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Role tag of the subject
    pub role: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject issued at `issued_at` and valid for `lifetime`.
    pub fn new(
        subject: impl ToString,
        role: impl ToString,
        issuer: impl ToString,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            role: role.to_string(),
            iss: issuer.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
        }
    }

    /// A token is live only while `exp` is strictly in the future.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
