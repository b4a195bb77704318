use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Profile;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .user_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, "User registered", user.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    username: String,
    email: String,
    password: String,
    #[serde(default)]
    wallet_address: String,
    #[serde(default)]
    profile: ProfileRequestBody,
}

/// Profile fields accepted at registration; preferences start empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileRequestBody {
    #[serde(default)]
    avatar: String,
    #[serde(default)]
    bio: String,
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterCommand, UserError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        Ok(RegisterCommand::new(username, email, self.password)
            .with_wallet_address(self.wallet_address)
            .with_profile(Profile {
                avatar: self.profile.avatar,
                bio: self.profile.bio,
                ..Default::default()
            }))
    }
}
