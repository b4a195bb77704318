use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // A name that can never exist is reported like any other failed login
    let username =
        Username::new(body.username).map_err(|_| ApiError::from(UserError::InvalidCredentials))?;

    let session = state
        .user_service
        .login(LoginCommand {
            username,
            password: body.password,
        })
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "Login successful",
        LoginResponseData {
            access_token: session.access_token,
            user: (&session.user).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub user: UserData,
}
