//! Authentication utilities library
//!
//! Provides the credential and token path of the user service:
//! - Password policy enforcement
//! - Credential hashing (Argon2id by default, bcrypt available)
//! - JWT issuance and validation (HMAC family only)
//! - Request gate turning an `Authorization` header into an [`AuthContext`]
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{Argon2Hasher, CredentialHasher};
//!
//! let hasher = Argon2Hasher::new();
//! let hash = hasher.hash("Correct!Horse").unwrap();
//! assert!(hasher.verify("Correct!Horse", &hash).unwrap());
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{TokenIssuer, TokenSettings, TokenValidator};
//!
//! let settings = TokenSettings::new(b"secret_key_at_least_32_bytes_long!", "story-platform").unwrap();
//! let token = TokenIssuer::new(&settings).issue("user123", "reader").unwrap();
//! let claims = TokenValidator::new(&settings).validate(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenSettings};
//!
//! let settings = TokenSettings::new(b"secret_key_at_least_32_bytes_long!", "story-platform").unwrap();
//! let auth = Authenticator::new(&settings);
//!
//! // Register: policy check, then hash
//! let hash = auth.prepare_secret("Correct!Horse").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("Correct!Horse", &hash, "user123", "reader").unwrap();
//!
//! // Protected call: gate the Authorization header
//! let header = format!("Bearer {}", result.access_token);
//! let context = auth.admit(Some(&header)).unwrap();
//! assert_eq!(context.subject_id, "user123");
//! ```

pub mod authenticator;
pub mod gate;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use gate::AuthContext;
pub use gate::AuthGate;
pub use gate::GateRejection;
pub use jwt::Claims;
pub use jwt::InvalidTokenReason;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use jwt::TokenSettings;
pub use jwt::TokenValidator;
pub use password::Argon2Hasher;
pub use password::BcryptHasher;
pub use password::CredentialHasher;
pub use password::PasswordError;
pub use password::PasswordPolicy;
pub use password::PolicyError;
