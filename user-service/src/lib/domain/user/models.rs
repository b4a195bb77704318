use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde_json::Map;
use serde_json::Value;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::RoleError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Holds the stored credential: `password_hash` is a self-describing
/// salted hash, never the plaintext.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    /// Linked blockchain wallet, empty when none was given
    pub wallet_address: String,
    pub role: Role,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

/// Public profile, one per user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub avatar: String,
    pub bio: String,
    /// Free-form settings document such as language or theme
    pub preferences: Map<String, Value>,
}

/// Partial profile change; absent fields are left untouched.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub preferences: Option<Map<String, Value>>,
}

impl ProfileUpdate {
    /// Apply the provided fields to an existing profile.
    pub fn apply(self, profile: &mut Profile) {
        if let Some(avatar) = self.avatar {
            profile.avatar = avatar;
        }
        if let Some(bio) = self.bio {
            profile.bio = bio;
        }
        if let Some(preferences) = self.preferences {
            profile.preferences = preferences;
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 8-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Empty` - Username is the empty string
    /// * `TooShort` - Username shorter than 8 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length == 0 {
            Err(UsernameError::Empty)
        } else if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role tag carried in the directory and in access tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Reader,
    Author,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reader => "reader",
            Role::Author => "author",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reader" => Ok(Role::Reader),
            "author" => Ok(Role::Author),
            "admin" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    /// Plain text password (checked against the policy and hashed by the service)
    pub password: String,
    pub wallet_address: String,
    pub profile: Profile,
}

impl RegisterCommand {
    pub fn new(username: Username, email: EmailAddress, password: String) -> Self {
        Self {
            username,
            email,
            password,
            wallet_address: String::new(),
            profile: Profile::default(),
        }
    }

    pub fn with_wallet_address(mut self, wallet_address: String) -> Self {
        self.wallet_address = wallet_address;
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }
}

/// Command to log a user in
#[derive(Debug)]
pub struct LoginCommand {
    pub username: Username,
    pub password: String,
}

/// Command to update an existing user with optional validated fields.
///
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub password: Option<String>,
    pub wallet_address: Option<String>,
    pub profile: ProfileUpdate,
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub access_token: String,
}
