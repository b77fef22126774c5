//! `sentinel-auth`: token lifecycle and authorization-claim pipeline.
//!
//! This crate is decoupled from HTTP and storage: user and role records come
//! in through the directory traits, and every check is a pure function of its
//! inputs plus an injected [`TokenConfig`].

pub mod assembler;
pub mod authorize;
pub mod claims;
pub mod config;
pub mod context;
pub mod directory;
pub mod error;
pub mod hasher;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod service;
pub mod token;

pub use assembler::{assemble_authorities, encode_authorities};
pub use authorize::{AccessDecisionEngine, AccessPolicy, AccessRule, Decision, ResourcePolicy, decide};
pub use claims::{TokenClaims, validate_window};
pub use config::{TOKEN_TTL_SECS, TokenConfig};
pub use context::AuthorizationContext;
pub use directory::{InMemoryDirectory, RoleDirectory, UserDirectory};
pub use error::{AuthError, AuthResult, ValidationError};
pub use hasher::{Argon2PasswordHasher, PasswordHasher};
pub use permissions::Permission;
pub use principal::{Authority, Principal};
pub use roles::{Role, RoleName};
pub use service::{AuthResponse, AuthService, CreateUserRequest, LoginRequest};
pub use token::{Hs256TokenValidator, IssuedToken, TokenIssuer, TokenValidator};
