use auth::AuthContext;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ensure_self_or_admin;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    ensure_self_or_admin(&context, &user_id)?;

    state
        .user_service
        .delete_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::message(StatusCode::OK, "User deleted"))
}
