use auth::AuthContext;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use super::ensure_self_or_admin;
use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::ProfileUpdate;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub profile: UpdateProfileRequest,
}

/// Partial profile change; `preferences` must be a JSON object.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub preferences: Option<Map<String, Value>>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        let username = self.username.map(Username::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;

        Ok(UpdateUserCommand {
            username,
            email,
            password: self.password,
            wallet_address: self.wallet_address,
            profile: ProfileUpdate {
                avatar: self.profile.avatar,
                bio: self.profile.bio,
                preferences: self.profile.preferences,
            },
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    ensure_self_or_admin(&context, &user_id)?;
    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, "User updated", user.into()))
}
