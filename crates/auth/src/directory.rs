//! User and role lookups.
//!
//! Storage sits outside this crate; these traits describe what the core
//! needs from it. [`InMemoryDirectory`] backs tests and the demo server.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::permissions::{CREATE, DELETE, READ, REFACTOR, UPDATE};
use crate::{AuthError, AuthResult, Principal, Role, RoleName};

pub trait UserDirectory: Send + Sync {
    fn find_by_username(&self, username: &str) -> AuthResult<Option<Principal>>;

    /// Fails with [`AuthError::UsernameTaken`] if the username exists.
    fn insert(&self, principal: Principal) -> AuthResult<()>;
}

pub trait RoleDirectory: Send + Sync {
    /// Matching roles with permissions resolved, in request order. Names with
    /// no registered role are absent from the result.
    fn find_by_names(&self, names: &[RoleName]) -> AuthResult<Vec<Role>>;
}

#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: RwLock<HashMap<String, Principal>>,
    roles: RwLock<HashMap<RoleName, Role>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory preloaded with the standard role table.
    pub fn with_default_roles() -> Self {
        let directory = Self::new();
        for role in default_roles() {
            directory.register_role(role);
        }
        directory
    }

    pub fn register_role(&self, role: Role) {
        let mut roles = self.roles.write().unwrap_or_else(|p| p.into_inner());
        roles.insert(role.name, role);
    }

    pub fn user_count(&self) -> usize {
        self.users.read().map(|u| u.len()).unwrap_or(0)
    }
}

impl UserDirectory for InMemoryDirectory {
    fn find_by_username(&self, username: &str) -> AuthResult<Option<Principal>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::directory("user table lock poisoned"))?;
        Ok(users.get(username).cloned())
    }

    fn insert(&self, principal: Principal) -> AuthResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AuthError::directory("user table lock poisoned"))?;
        if users.contains_key(&principal.username) {
            return Err(AuthError::UsernameTaken);
        }
        users.insert(principal.username.clone(), principal);
        Ok(())
    }
}

impl RoleDirectory for InMemoryDirectory {
    fn find_by_names(&self, names: &[RoleName]) -> AuthResult<Vec<Role>> {
        let roles = self
            .roles
            .read()
            .map_err(|_| AuthError::directory("role table lock poisoned"))?;
        Ok(names.iter().filter_map(|n| roles.get(n).cloned()).collect())
    }
}

/// The standard role table.
pub fn default_roles() -> Vec<Role> {
    vec![
        Role::new(RoleName::Admin, [CREATE, READ, UPDATE, DELETE]),
        Role::new(RoleName::User, [READ]),
        Role::new(RoleName::Developer, [CREATE, READ, UPDATE, DELETE, REFACTOR]),
        Role::new(RoleName::Invited, [READ]),
    ]
}

/// Demo accounts and the role each one holds.
pub const DEMO_USERS: [(&str, RoleName); 4] = [
    ("Duzz", RoleName::Developer),
    ("Noe", RoleName::Admin),
    ("Paul", RoleName::User),
    ("SoplaGaitas", RoleName::Invited),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roles_resolve_permissions() {
        let directory = InMemoryDirectory::with_default_roles();
        let roles = directory.find_by_names(&[RoleName::Developer]).unwrap();

        assert_eq!(roles.len(), 1);
        let perms: Vec<&str> = roles[0].permissions.iter().map(|p| p.as_str()).collect();
        assert_eq!(perms, vec!["CREATE", "READ", "UPDATE", "DELETE", "REFACTOR"]);
    }

    #[test]
    fn lookup_preserves_request_order_and_skips_missing() {
        let directory = InMemoryDirectory::new();
        directory.register_role(Role::new(RoleName::User, [READ]));
        directory.register_role(Role::new(RoleName::Admin, [CREATE]));

        let roles = directory
            .find_by_names(&[RoleName::User, RoleName::Developer, RoleName::Admin])
            .unwrap();
        let names: Vec<RoleName> = roles.iter().map(|r| r.name).collect();
        assert_eq!(names, vec![RoleName::User, RoleName::Admin]);
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let directory = InMemoryDirectory::new();
        directory.insert(Principal::active("Noe", "h", vec![])).unwrap();

        assert_eq!(
            directory.insert(Principal::active("Noe", "h2", vec![])),
            Err(AuthError::UsernameTaken)
        );
        assert!(directory.insert(Principal::active("noe", "h", vec![])).is_ok());
        assert_eq!(directory.user_count(), 2);
    }
}
