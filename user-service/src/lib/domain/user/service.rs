use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::Session;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Hashing and verification are CPU-bound, so they run on tokio's
/// blocking pool rather than on the async workers.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User directory implementation
    /// * `authenticator` - Credential and token operations built from process configuration
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn blocking<T, F>(&self, task: F) -> Result<T, UserError>
    where
        F: FnOnce(&Authenticator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || task(&authenticator))
            .await
            .map_err(|e| UserError::Unknown(format!("Credential task failed: {}", e)))
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        self.authenticator.check_policy(&password)?;

        self.blocking(move |authenticator| authenticator.hash_secret(&password))
            .await?
            .map_err(|e| UserError::Credential(e.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError> {
        let RegisterCommand {
            username,
            email,
            password,
            wallet_address,
            profile,
        } = command;

        // Cheap checks before paying for a hash
        self.authenticator.check_policy(&password)?;
        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(UserError::UsernameAlreadyExists(username.to_string()));
        }
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(UserError::EmailAlreadyExists(email.to_string()));
        }

        let password_hash = self.hash_password(password).await?;

        let user = User {
            id: UserId::new(),
            username,
            email,
            password_hash,
            wallet_address,
            role: Role::default(),
            profile,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, UserError> {
        let LoginCommand { username, password } = command;

        let Some(user) = self.repository.find_by_username(&username).await? else {
            // Unknown names cost one hash, same as a wrong password
            self.blocking(move |authenticator| {
                let _ = authenticator.hash_secret(&password);
            })
            .await?;

            tracing::info!(username = %username, "Login rejected");
            return Err(UserError::InvalidCredentials);
        };

        let stored_hash = user.password_hash.clone();
        let subject = user.id.to_string();
        let role = user.role.as_str();

        let result = self
            .blocking(move |authenticator| {
                authenticator.authenticate(&password, &stored_hash, &subject, role)
            })
            .await?;

        match result {
            Ok(result) => {
                tracing::info!(user_id = %user.id, "Login succeeded");
                Ok(Session {
                    user,
                    access_token: result.access_token,
                })
            }
            Err(auth::AuthenticationError::InvalidCredentials) => {
                tracing::info!(username = %username, "Login rejected");
                Err(UserError::InvalidCredentials)
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Login failed");
                Err(e.into())
            }
        }
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserError::NotFoundByUsername(username.to_string()))
    }

    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserError::NotFoundByEmail(email.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_wallet_address) = command.wallet_address {
            user.wallet_address = new_wallet_address;
        }

        command.profile.apply(&mut user.profile);

        if let Some(new_password) = command.password {
            user.password_hash = self.hash_password(new_password).await?;
        }

        let updated_user = self.repository.update(user).await?;

        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;

        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
