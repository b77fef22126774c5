use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::errors;
use crate::context::RequestAuth;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/whoami", get(whoami))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(auth): Extension<RequestAuth>) -> axum::response::Response {
    // Unreachable under the default policy.
    let Some(ctx) = auth.context() else {
        return errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized");
    };

    Json(serde_json::json!({
        "username": ctx.identity(),
        "authorities": ctx.authorities(),
    }))
    .into_response()
}
