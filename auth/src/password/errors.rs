use thiserror::Error;

/// Error type for credential hashing operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Password policy violation, one variant per rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Password must not be empty")]
    Empty,

    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password must contain at least one upper-case letter")]
    MissingUppercase,

    #[error("Password must contain at least one special character")]
    MissingSpecialCharacter,
}
