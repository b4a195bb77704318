use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// The password is checked against the policy and hashed before the
    /// user reaches the repository.
    ///
    /// # Errors
    /// * `WeakPassword` - Password violates the policy
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Credential` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password (indistinguishable)
    /// * `Credential` - Stored hash unreadable or token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<Session, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by unique username.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError>;

    /// Retrieve user by unique email address.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No user with this email
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError>;

    /// Retrieve all users.
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Update existing user with optional fields.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `WeakPassword` - New password violates the policy
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// User directory store.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier (None if not found).
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username (None if not found).
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address (None if not found).
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve all users from storage.
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Update existing user in storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
