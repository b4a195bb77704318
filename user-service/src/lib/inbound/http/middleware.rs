use auth::GateRejection;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that runs the authentication gate and stores the resulting
/// `AuthContext` in request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = match req.headers().get(AUTHORIZATION) {
        None => None,
        Some(value) => Some(value.to_str().map_err(|_| reject(GateRejection::MalformedHeader))?),
    };

    let context = state.authenticator.admit(header).map_err(reject)?;

    tracing::debug!(subject_id = %context.subject_id, role = %context.role, "Request admitted");
    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

fn reject(rejection: GateRejection) -> ApiError {
    tracing::warn!(reason = %rejection, "Request rejected by authentication gate");
    ApiError::Unauthorized(rejection.to_string())
}
