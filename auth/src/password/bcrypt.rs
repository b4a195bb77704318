use bcrypt::BcryptError;
use bcrypt::DEFAULT_COST;

use super::errors::PasswordError;
use super::CredentialHasher;

/// bcrypt credential hasher, for directories holding `$2b$` hashes.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(plaintext, stored_hash).map_err(|e| match e {
            BcryptError::InvalidHash(_)
            | BcryptError::InvalidPrefix(_)
            | BcryptError::InvalidCost(_)
            | BcryptError::InvalidBase64(_) => PasswordError::MalformedHash(e.to_string()),
            other => PasswordError::HashingFailed(other.to_string()),
        })
    }
}
