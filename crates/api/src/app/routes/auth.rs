//! Public login and sign-up endpoints.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;

use sentinel_auth::{AuthResponse, AuthResult, CreateUserRequest, LoginRequest};

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/auth/log-in", post(log_in))
        .route("/auth/sign-up", post(sign_up))
}

/// POST /auth/log-in
pub async fn log_in(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LogInBody>,
) -> axum::response::Response {
    let request = LoginRequest::from(body);
    let result = run_blocking(move || services.auth.login(&request, Utc::now())).await;

    respond(StatusCode::OK, result)
}

/// POST /auth/sign-up
pub async fn sign_up(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::SignUpBody>,
) -> axum::response::Response {
    let request = CreateUserRequest::from(body);
    let result = run_blocking(move || services.auth.create_user(&request, Utc::now())).await;

    respond(StatusCode::CREATED, result)
}

/// Password hashing is CPU-bound; keep it off the async workers.
async fn run_blocking<F>(f: F) -> Option<AuthResult<AuthResponse>>
where
    F: FnOnce() -> AuthResult<AuthResponse> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => Some(result),
        Err(e) => {
            tracing::error!(error = %e, "authentication task failed");
            None
        }
    }
}

fn respond(success: StatusCode, result: Option<AuthResult<AuthResponse>>) -> axum::response::Response {
    match result {
        Some(Ok(response)) => (success, Json(response)).into_response(),
        Some(Err(e)) => errors::auth_error_to_response(e),
        None => errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error"),
    }
}
