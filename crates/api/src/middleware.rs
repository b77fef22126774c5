//! Per-request authentication stage.
//!
//! Extracts the bearer credential, validates it and binds an
//! [`AuthorizationContext`]. Never rejects a request itself: on any failure
//! the request continues with no context and the access gate denies it.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderName},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};

use sentinel_auth::{AuthorizationContext, TokenValidator, ValidationError};

use crate::context::RequestAuth;

pub const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<dyn TokenValidator>,
    pub header: HeaderName,
}

/// Terminal states of the stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// No credential header; continue anonymously.
    NoCredential,
    /// A credential was present but invalid; continue anonymously.
    Rejected(ValidationError),
    ContextBound(AuthorizationContext),
}

impl AuthOutcome {
    pub fn into_request_auth(self) -> RequestAuth {
        match self {
            AuthOutcome::ContextBound(ctx) => RequestAuth::bound(ctx),
            AuthOutcome::NoCredential | AuthOutcome::Rejected(_) => RequestAuth::anonymous(),
        }
    }
}

pub fn authenticate(state: &AuthState, headers: &HeaderMap, now: DateTime<Utc>) -> AuthOutcome {
    let Some(value) = headers.get(&state.header) else {
        return AuthOutcome::NoCredential;
    };

    let token = match extract_bearer(value.to_str().ok()) {
        Ok(token) => token,
        Err(e) => return reject(e),
    };

    match state.validator.validate(token, now) {
        Ok(claims) => {
            let ctx = AuthorizationContext::from_claims(&claims);
            tracing::debug!(identity = ctx.identity(), "request authenticated");
            AuthOutcome::ContextBound(ctx)
        }
        Err(e) => reject(e),
    }
}

fn reject(reason: ValidationError) -> AuthOutcome {
    tracing::warn!(%reason, "bearer token rejected");
    AuthOutcome::Rejected(reason)
}

/// A credential without the exact `Bearer ` prefix is malformed.
fn extract_bearer(value: Option<&str>) -> Result<&str, ValidationError> {
    let token = value
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .ok_or(ValidationError::Malformed)?;

    if token.is_empty() {
        return Err(ValidationError::Malformed);
    }
    Ok(token)
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let outcome = authenticate(&state, req.headers(), Utc::now());
    req.extensions_mut().insert(outcome.into_request_auth());

    next.run(req).await
}
