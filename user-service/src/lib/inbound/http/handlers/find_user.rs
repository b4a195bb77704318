use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let email = EmailAddress::new(email).map_err(UserError::from)?;

    state
        .user_service
        .get_user_by_email(&email)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, "User retrieved", user.into()))
}

pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let username = Username::new(username).map_err(UserError::from)?;

    state
        .user_service
        .get_user_by_username(&username)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, "User retrieved", user.into()))
}
