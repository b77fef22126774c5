//! Runtime configuration read from the environment.

use std::net::SocketAddr;

use axum::http::HeaderName;
use thiserror::Error;

use sentinel_auth::{AuthError, TokenConfig};

pub const DEFAULT_ISSUER: &str = "sentinel";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_AUTH_HEADER: &str = "authorization";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error(transparent)]
    Token(#[from] AuthError),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub token: TokenConfig,
    /// Header carrying `Bearer <token>`.
    pub auth_header: HeaderName,
    pub bind_addr: SocketAddr,
    /// When set, demo users are seeded with this password.
    pub seed_demo_password: Option<String>,
}

impl ApiConfig {
    pub fn new(token: TokenConfig) -> Self {
        Self {
            token,
            auth_header: HeaderName::from_static(DEFAULT_AUTH_HEADER),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            seed_demo_password: None,
        }
    }

    pub fn with_auth_header(mut self, header: HeaderName) -> Self {
        self.auth_header = header;
        self
    }

    pub fn with_demo_users(mut self, password: impl Into<String>) -> Self {
        self.seed_demo_password = Some(password.into());
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let issuer = lookup("JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string());
        let token = TokenConfig::new(secret, issuer)?;

        let header = lookup("AUTH_HEADER").unwrap_or_else(|| DEFAULT_AUTH_HEADER.to_string());
        let auth_header = HeaderName::from_bytes(header.to_ascii_lowercase().as_bytes()).map_err(|e| {
            ConfigError::Invalid {
                name: "AUTH_HEADER",
                reason: e.to_string(),
            }
        })?;

        let bind = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            name: "BIND_ADDR",
            reason: e.to_string(),
        })?;

        let seed_demo_password = lookup("SEED_DEMO_PASSWORD").filter(|p| !p.is_empty());

        Ok(Self {
            token,
            auth_header,
            bind_addr,
            seed_demo_password,
        })
    }
}
