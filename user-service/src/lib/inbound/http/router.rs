use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_user::current_user;
use super::handlers::delete_user::delete_user;
use super::handlers::find_user::get_user_by_email;
use super::handlers::find_user::get_user_by_username;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register));

    let protected_routes = Router::new()
        .route("/users", get(list_users))
        .route("/users/me", get(current_user))
        .route("/users/email/:email", get(get_user_by_email))
        .route("/users/username/:username", get(get_user_by_username))
        .route("/users/:user_id", put(update_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers stay out of the span: they carry bearer tokens
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
