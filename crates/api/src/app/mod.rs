//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: directory, hasher, token issuer/validator, access policy
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs and mapping to core requests
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};

use sentinel_auth::AuthResult;

use crate::authz::{AUTH_RESOURCE, GateState, METHOD_RESOURCE, SYSTEM_RESOURCE, access_gate};
use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> AuthResult<Router> {
    let services = Arc::new(services::build_services(config)?);
    Ok(router(services, config))
}

pub fn router(services: Arc<services::AppServices>, config: &ApiConfig) -> Router {
    let auth_state = middleware::AuthState {
        validator: services.validator.clone(),
        header: config.auth_header.clone(),
    };
    let gate = |resource: &'static str| {
        axum::middleware::from_fn_with_state(
            GateState::new(services.engine.clone(), resource),
            access_gate,
        )
    };

    // Every route is authenticated (possibly anonymously) first, then gated
    // by its resource's rules.
    Router::new()
        .merge(routes::auth::router().route_layer(gate(AUTH_RESOURCE)))
        .merge(routes::method::router().route_layer(gate(METHOD_RESOURCE)))
        .merge(routes::system::router().route_layer(gate(SYSTEM_RESOURCE)))
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ))
}
