use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are opaque strings (e.g. "READ") resolved from a role record.
/// They flatten into bare authorities, without the role prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

pub const CREATE: Permission = Permission::from_static("CREATE");
pub const READ: Permission = Permission::from_static("READ");
pub const UPDATE: Permission = Permission::from_static("UPDATE");
pub const DELETE: Permission = Permission::from_static("DELETE");
pub const REFACTOR: Permission = Permission::from_static("REFACTOR");
