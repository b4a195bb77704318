use auth::AuthenticationError;
use auth::PolicyError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must not be empty")]
    Empty,

    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("{0}")]
    WeakPassword(#[from] PolicyError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User not found with username: {0}")]
    NotFoundByUsername(String),

    #[error("User not found with email: {0}")]
    NotFoundByEmail(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Credential processing failed: {0}")]
    Credential(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<AuthenticationError> for UserError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
            AuthenticationError::Policy(e) => UserError::WeakPassword(e),
            AuthenticationError::PasswordError(e) => UserError::Credential(e.to_string()),
            AuthenticationError::JwtError(e) => UserError::Credential(e.to_string()),
        }
    }
}
