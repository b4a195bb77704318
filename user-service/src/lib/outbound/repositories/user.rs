use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use serde_json::Map;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::Transaction;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Profile;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const SELECT_USER: &str = r#"
    SELECT u.id, u.username, u.email, u.password_hash, u.wallet_address, u.role, u.created_at,
           COALESCE(p.avatar, '') AS avatar,
           COALESCE(p.bio, '') AS bio,
           COALESCE(p.preferences, '{}'::jsonb) AS preferences
    FROM users u
    LEFT JOIN profiles p ON p.user_id = u.id
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    wallet_address: String,
    role: String,
    created_at: DateTime<Utc>,
    avatar: String,
    bio: String,
    preferences: Json<Map<String, Value>>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            wallet_address: row.wallet_address,
            role: row.role.parse()?,
            profile: Profile {
                avatar: row.avatar,
                bio: row.bio,
                preferences: row.preferences.0,
            },
            created_at: row.created_at,
        })
    }
}

/// Map unique violations to duplicate errors by constraint name.
fn map_write_error(e: sqlx::Error, user: &User) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("users_username_key") {
                return UserError::UsernameAlreadyExists(user.username.as_str().to_string());
            }
            if db_err.constraint() == Some("users_email_key") {
                return UserError::EmailAlreadyExists(user.email.as_str().to_string());
            }
        }
    }
    UserError::DatabaseError(e.to_string())
}

fn database_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

/// Insert or replace the profile row of a user.
async fn upsert_profile(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
) -> Result<(), UserError> {
    sqlx::query(
        r#"
        INSERT INTO profiles (user_id, avatar, bio, preferences)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id)
        DO UPDATE SET avatar = EXCLUDED.avatar, bio = EXCLUDED.bio, preferences = EXCLUDED.preferences
        "#,
    )
    .bind(user.id.0)
    .bind(user.profile.avatar.as_str())
    .bind(user.profile.bio.as_str())
    .bind(Json(&user.profile.preferences))
    .execute(&mut **tx)
    .await
    .map_err(database_error)?;

    Ok(())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, wallet_address, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.wallet_address.as_str())
        .bind(user.role.as_str())
        .bind(user.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, &user))?;

        upsert_profile(&mut tx, &user).await?;
        tx.commit().await.map_err(database_error)?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(&format!("{} WHERE u.id = $1", SELECT_USER))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(&format!("{} WHERE u.username = $1", SELECT_USER))
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(&format!("{} WHERE u.email = $1", SELECT_USER))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        sqlx::query_as::<_, UserRow>(&format!("{} ORDER BY u.created_at", SELECT_USER))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, wallet_address = $5, role = $6
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.wallet_address.as_str())
        .bind(user.role.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, &user))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        upsert_profile(&mut tx, &user).await?;
        tx.commit().await.map_err(database_error)?;

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
