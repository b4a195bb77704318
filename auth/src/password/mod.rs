pub mod argon2;
pub mod bcrypt;
pub mod errors;
pub mod policy;

pub use self::argon2::Argon2Hasher;
pub use self::bcrypt::BcryptHasher;
pub use errors::PasswordError;
pub use errors::PolicyError;
pub use policy::PasswordPolicy;

/// One-way salted hashing of secrets.
///
/// Call sites depend on this trait only, so the algorithm and its cost
/// parameters can change without touching them. Implementations must salt
/// every call freshly and compare in constant time.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Hash a plaintext secret into a self-describing encoded string.
    ///
    /// # Errors
    /// * `HashingFailed` - Salt generation or key derivation failed
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError>;

    /// Check a plaintext secret against a stored hash.
    ///
    /// # Returns
    /// True if the secret matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash cannot be parsed by this algorithm
    fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, PasswordError>;
}
