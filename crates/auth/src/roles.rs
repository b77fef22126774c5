use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Permission;

/// Closed set of role names known to the system.
///
/// Unknown names fail to parse; callers must surface that as an error instead
/// of dropping the name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    Admin,
    User,
    Developer,
    Invited,
}

impl RoleName {
    pub const ALL: [RoleName; 4] = [
        RoleName::Admin,
        RoleName::User,
        RoleName::Developer,
        RoleName::Invited,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "ADMIN",
            RoleName::User => "USER",
            RoleName::Developer => "DEVELOPER",
            RoleName::Invited => "INVITED",
        }
    }
}

impl core::fmt::Display for RoleName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role name '{0}'")]
pub struct UnknownRoleName(pub String);

impl FromStr for RoleName {
    type Err = UnknownRoleName;

    /// Case-sensitive: "admin" is not "ADMIN".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoleName::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRoleName(s.to_string()))
    }
}

/// A role record with its permissions already resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: RoleName,
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn new(name: RoleName, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            name,
            permissions: permissions.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_parse_exactly() {
        assert_eq!("ADMIN".parse::<RoleName>().unwrap(), RoleName::Admin);
        assert_eq!("INVITED".parse::<RoleName>().unwrap(), RoleName::Invited);
        assert_eq!(
            "admin".parse::<RoleName>(),
            Err(UnknownRoleName("admin".to_string()))
        );
        assert!("NONEXISTENT".parse::<RoleName>().is_err());
    }

    #[test]
    fn role_names_serialize_as_symbols() {
        let json = serde_json::to_string(&RoleName::Developer).unwrap();
        assert_eq!(json, "\"DEVELOPER\"");
    }
}
