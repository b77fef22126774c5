use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use sentinel_auth::AuthError;

/// Map login / sign-up failures to responses.
///
/// Credential failures share one body so callers cannot tell an unknown
/// username from a wrong password or an unusable account.
pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::InvalidCredentials | AuthError::AccountUnavailable => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "invalid username or password",
        ),
        AuthError::UnknownRoles(_) | AuthError::EmptyRoleSet | AuthError::TooManyRoles { .. } => {
            json_error(StatusCode::BAD_REQUEST, "invalid_roles", err.to_string())
        }
        AuthError::InvalidRequest(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        AuthError::UsernameTaken => json_error(StatusCode::CONFLICT, "conflict", "username already taken"),
        AuthError::Signing(_) | AuthError::Hashing(_) | AuthError::Directory(_) => {
            tracing::error!(error = %err, "authentication backend failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
