use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user directory.
///
/// Enforces the same uniqueness rules as the PostgreSQL schema. Contents
/// are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn ensure_unique(users: &HashMap<UserId, User>, candidate: &User) -> Result<(), UserError> {
    for other in users.values().filter(|u| u.id != candidate.id) {
        if other.username == candidate.username {
            return Err(UserError::UsernameAlreadyExists(
                candidate.username.to_string(),
            ));
        }
        if other.email == candidate.email {
            return Err(UserError::EmailAlreadyExists(candidate.email.to_string()));
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        ensure_unique(&users, &user)?;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        ensure_unique(&users, &user)?;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}
