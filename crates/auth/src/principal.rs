use serde::{Deserialize, Serialize};

use crate::{Permission, Role, RoleName};

/// Prefix that distinguishes role authorities from bare permission authorities.
pub const ROLE_PREFIX: &str = "ROLE_";

/// Account record as returned by the user directory.
///
/// Treated as an immutable value: the core never mutates a fetched principal.
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    /// Unique, case-sensitive.
    pub username: String,
    /// Opaque one-way hash produced by a [`crate::PasswordHasher`].
    pub credential_hash: String,
    pub enabled: bool,
    pub account_non_expired: bool,
    pub account_non_locked: bool,
    pub credential_non_expired: bool,
    pub roles: Vec<Role>,
}

impl Principal {
    /// A new, fully active account.
    pub fn active(
        username: impl Into<String>,
        credential_hash: impl Into<String>,
        roles: Vec<Role>,
    ) -> Self {
        Self {
            username: username.into(),
            credential_hash: credential_hash.into(),
            enabled: true,
            account_non_expired: true,
            account_non_locked: true,
            credential_non_expired: true,
            roles,
        }
    }

    /// Whether every account status flag allows authentication.
    pub fn is_usable(&self) -> bool {
        self.enabled && self.account_non_expired && self.account_non_locked && self.credential_non_expired
    }
}

impl core::fmt::Debug for Principal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Principal")
            .field("username", &self.username)
            .field("credential_hash", &"<redacted>")
            .field("enabled", &self.enabled)
            .field("account_non_expired", &self.account_non_expired)
            .field("account_non_locked", &self.account_non_locked)
            .field("credential_non_expired", &self.credential_non_expired)
            .field("roles", &self.roles)
            .finish()
    }
}

/// Flattened authority string carried in tokens.
///
/// Either a prefixed role (`ROLE_ADMIN`) or a bare permission (`READ`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn from_role(role: RoleName) -> Self {
        Self(format!("{ROLE_PREFIX}{}", role.as_str()))
    }

    pub fn from_permission(permission: &Permission) -> Self {
        Self(permission.as_str().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Authority {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
