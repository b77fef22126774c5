//! API-side access gate.
//!
//! Each resource router carries a gate naming its resource; the operation
//! identifier is `"<METHOD> <matched path>"`. The rule comes from the
//! [`AccessPolicy`] table, so the whole policy is visible in one place.

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use sentinel_auth::{AccessDecisionEngine, AccessPolicy, AccessRule, Decision, ResourcePolicy};
use sentinel_auth::permissions::{READ, REFACTOR};

use crate::app::errors::json_error;
use crate::context::RequestAuth;

pub const AUTH_RESOURCE: &str = "auth";
pub const METHOD_RESOURCE: &str = "method";
pub const SYSTEM_RESOURCE: &str = "system";

/// The policy served by the API.
pub fn default_policy() -> AccessPolicy {
    AccessPolicy::new()
        .with_resource(AUTH_RESOURCE, ResourcePolicy::new(AccessRule::PermitAll))
        .with_resource(
            SYSTEM_RESOURCE,
            ResourcePolicy::new(AccessRule::PermitAll)
                .with_operation("GET /whoami", AccessRule::require_authority(READ.as_str())),
        )
        .with_resource(
            METHOD_RESOURCE,
            ResourcePolicy::new(AccessRule::DenyAll)
                .with_operation("GET /method/get", AccessRule::require_authority(READ.as_str()))
                .with_operation(
                    "POST /method/post",
                    AccessRule::require_any_role(["ADMIN", "DEVELOPER"]),
                )
                .with_operation(
                    "PATCH /method/patch",
                    AccessRule::require_authority(REFACTOR.as_str()),
                ),
        )
}

#[derive(Clone)]
pub struct GateState {
    pub engine: Arc<AccessDecisionEngine>,
    pub resource: &'static str,
}

impl GateState {
    pub fn new(engine: Arc<AccessDecisionEngine>, resource: &'static str) -> Self {
        Self { engine, resource }
    }
}

/// Decide an operation for the current request.
///
/// Denials carry no detail: 401 without a context, 403 with one.
pub fn authorize_operation(
    engine: &AccessDecisionEngine,
    resource: &str,
    operation: &str,
    auth: &RequestAuth,
) -> Result<(), Response> {
    match engine.decide_operation(resource, operation, auth.context()) {
        Decision::Permit => Ok(()),
        Decision::Deny if auth.context().is_none() => Err(json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "unauthorized",
        )),
        Decision::Deny => Err(json_error(StatusCode::FORBIDDEN, "forbidden", "forbidden")),
    }
}

pub async fn access_gate(
    State(gate): State<GateState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let operation = match req.extensions().get::<MatchedPath>() {
        Some(path) => format!("{} {}", req.method(), path.as_str()),
        None => format!("{} {}", req.method(), req.uri().path()),
    };
    let auth = req
        .extensions()
        .get::<RequestAuth>()
        .cloned()
        .unwrap_or_default();

    if let Err(denied) = authorize_operation(&gate.engine, gate.resource, &operation, &auth) {
        return denied;
    }

    next.run(req).await
}
