//! HTTP API: request authentication, access gating and the auth endpoints.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
