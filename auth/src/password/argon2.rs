use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;
use super::CredentialHasher;

/// Argon2id credential hasher.
///
/// Produces PHC strings carrying algorithm, parameters and salt, so
/// verification always uses the parameters the hash was created with.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Create a hasher with the crate's default cost parameters
    /// (19 MiB memory, 2 iterations, 1 lane).
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a hasher with explicit cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(stored_hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        // The verifier compares digests in constant time.
        match self
            .argon2()
            .verify_password(plaintext.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }
}
