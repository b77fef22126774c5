//! Login and user creation.
//!
//! Both operations are synchronous request/response flows: every failure
//! propagates to the caller, and nothing is persisted or issued on failure.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::assembler::assemble_authorities;
use crate::directory::{DEMO_USERS, RoleDirectory, UserDirectory};
use crate::{
    AuthError, AuthResult, PasswordHasher, Principal, RoleName, TokenConfig, TokenIssuer,
};

/// Upper bound on roles requested at user creation.
pub const MAX_ROLES_PER_USER: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    /// Role names as sent by the caller; parsed against [`RoleName`].
    pub roles: Vec<String>,
}

/// Outcome of a successful login or user creation.
///
/// Field order is part of the wire contract: `username, message, jwt, status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponse {
    pub username: String,
    pub message: String,
    #[serde(rename = "jwt")]
    pub token: String,
    pub status: bool,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserDirectory>,
    roles: Arc<dyn RoleDirectory>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: TokenIssuer,
    /// Verified against when the username is unknown.
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        roles: Arc<dyn RoleDirectory>,
        hasher: Arc<dyn PasswordHasher>,
        config: &TokenConfig,
    ) -> AuthResult<Self> {
        let dummy_hash = hasher.hash("sentinel-dummy-credential")?;
        Ok(Self {
            users,
            roles,
            hasher,
            issuer: TokenIssuer::new(config),
            dummy_hash,
        })
    }

    pub fn login(&self, request: &LoginRequest, now: DateTime<Utc>) -> AuthResult<AuthResponse> {
        let principal = self.users.find_by_username(&request.username)?;

        let Some(principal) = principal else {
            let _ = self.hasher.verify(&request.password, &self.dummy_hash);
            tracing::info!("login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(&request.password, &principal.credential_hash) {
            tracing::info!("login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        if !principal.is_usable() {
            tracing::info!(username = %principal.username, "login rejected: account unavailable");
            return Err(AuthError::AccountUnavailable);
        }

        let authorities = assemble_authorities(&principal)?;
        let issued = self.issuer.issue(&principal.username, &authorities, now)?;

        tracing::info!(username = %principal.username, "user authenticated");

        Ok(AuthResponse {
            username: principal.username,
            message: "user authenticated".to_string(),
            token: issued.token,
            status: true,
        })
    }

    pub fn create_user(
        &self,
        request: &CreateUserRequest,
        now: DateTime<Utc>,
    ) -> AuthResult<AuthResponse> {
        if request.username.trim().is_empty() {
            return Err(AuthError::invalid_request("username must not be blank"));
        }
        if request.password.trim().is_empty() {
            return Err(AuthError::invalid_request("password must not be blank"));
        }

        let role_names = parse_role_request(&request.roles)?;
        let roles = self.roles.find_by_names(&role_names)?;

        let missing: Vec<String> = role_names
            .iter()
            .filter(|n| !roles.iter().any(|r| r.name == **n))
            .map(|n| n.as_str().to_string())
            .collect();
        if roles.is_empty() || !missing.is_empty() {
            return Err(AuthError::UnknownRoles(missing));
        }

        if self.users.find_by_username(&request.username)?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let principal = Principal::active(
            request.username.clone(),
            self.hasher.hash(&request.password)?,
            roles,
        );
        let authorities = assemble_authorities(&principal)?;
        let issued = self.issuer.issue(&principal.username, &authorities, now)?;

        self.users.insert(principal)?;

        tracing::info!(username = %request.username, roles = ?role_names, "user created");

        Ok(AuthResponse {
            username: request.username.clone(),
            message: "user created".to_string(),
            token: issued.token,
            status: true,
        })
    }
}

/// Parse and de-duplicate requested role names, keeping first occurrence order.
fn parse_role_request(requested: &[String]) -> AuthResult<Vec<RoleName>> {
    if requested.is_empty() {
        return Err(AuthError::EmptyRoleSet);
    }
    if requested.len() > MAX_ROLES_PER_USER {
        return Err(AuthError::TooManyRoles { max: MAX_ROLES_PER_USER });
    }

    let mut names = Vec::with_capacity(requested.len());
    let mut unknown = Vec::new();
    for raw in requested {
        match raw.parse::<RoleName>() {
            Ok(name) if !names.contains(&name) => names.push(name),
            Ok(_) => {}
            Err(e) => unknown.push(e.0),
        }
    }

    if !unknown.is_empty() {
        return Err(AuthError::UnknownRoles(unknown));
    }
    Ok(names)
}

/// Insert the demo accounts (one per standard role) with a shared password.
///
/// Returns how many accounts were created; existing usernames are skipped.
pub fn seed_demo_users(
    users: &dyn UserDirectory,
    roles: &dyn RoleDirectory,
    hasher: &dyn PasswordHasher,
    password: &str,
) -> AuthResult<usize> {
    let mut created = 0;
    for (username, role) in DEMO_USERS {
        let resolved = roles.find_by_names(&[role])?;
        if resolved.is_empty() {
            return Err(AuthError::UnknownRoles(vec![role.as_str().to_string()]));
        }

        match users.insert(Principal::active(username, hasher.hash(password)?, resolved)) {
            Ok(()) => created += 1,
            Err(AuthError::UsernameTaken) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(created)
}
