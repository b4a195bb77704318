use auth::AuthContext;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::domain::user::models::Profile;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

pub mod current_user;
pub mod delete_user;
pub mod find_user;
pub mod list_users;
pub mod login;
pub mod register;
pub mod update_user;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::success(message, Some(data))))
    }
}

impl ApiSuccess<()> {
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::success(message, None)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::<()>::failure(message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_)
            | UserError::NotFoundByUsername(_)
            | UserError::NotFoundByEmail(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidUserId(_)
            | UserError::InvalidRole(_)
            | UserError::WeakPassword(_) => ApiError::BadRequest(err.to_string()),
            UserError::Credential(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                // Details stay in the log
                tracing::error!(error = %err, "Request failed with internal error");
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn success(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub wallet_address: String,
    pub role: String,
    pub profile: ProfileData,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    pub avatar: String,
    pub bio: String,
    pub preferences: Map<String, Value>,
}

impl From<&Profile> for ProfileData {
    fn from(profile: &Profile) -> Self {
        Self {
            avatar: profile.avatar.clone(),
            bio: profile.bio.clone(),
            preferences: profile.preferences.clone(),
        }
    }
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            wallet_address: user.wallet_address.clone(),
            role: user.role.as_str().to_string(),
            profile: (&user.profile).into(),
            created_at: user.created_at,
        }
    }
}

/// Only the subject itself or an admin may modify a user.
pub(crate) fn ensure_self_or_admin(context: &AuthContext, target: &UserId) -> Result<(), ApiError> {
    if context.role == Role::Admin.as_str() || context.subject_id == target.to_string() {
        Ok(())
    } else {
        tracing::warn!(
            subject_id = %context.subject_id,
            target = %target,
            "Forbidden modification attempt"
        );
        Err(ApiError::Forbidden(
            "Not allowed to modify another user".to_string(),
        ))
    }
}
