use auth::AuthContext;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Profile of the authenticated caller.
pub async fn current_user(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    // Tokens are only issued for stored ids, so a bad subject is a bad token
    let user_id = UserId::from_string(&context.subject_id)
        .map_err(|_| ApiError::Unauthorized("Invalid token: malformed".to_string()))?;

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, "User retrieved", user.into()))
}
