//! Claim assembly: roles and permissions flattened into authorities.

use crate::{AuthError, AuthResult, Authority, Principal, Role};

/// Separator used in the `authorities` claim.
pub const AUTHORITY_SEPARATOR: char = ',';

/// Flatten a principal's roles into an ordered authority list.
///
/// All `ROLE_<name>` entries come first, in role order, followed by every
/// permission of every role in role-then-permission order. Duplicates are
/// kept: a permission granted by two roles appears twice.
pub fn assemble_authorities(principal: &Principal) -> AuthResult<Vec<Authority>> {
    authorities_for_roles(&principal.roles)
}

pub fn authorities_for_roles(roles: &[Role]) -> AuthResult<Vec<Authority>> {
    if roles.is_empty() {
        return Err(AuthError::EmptyRoleSet);
    }

    let role_authorities = roles.iter().map(|r| Authority::from_role(r.name));
    let permission_authorities = roles
        .iter()
        .flat_map(|r| r.permissions.iter())
        .map(Authority::from_permission);

    Ok(role_authorities.chain(permission_authorities).collect())
}

/// Compact claim encoding: comma-joined, no whitespace.
pub fn encode_authorities(authorities: &[Authority]) -> String {
    let mut out = String::new();
    for (i, a) in authorities.iter().enumerate() {
        if i > 0 {
            out.push(AUTHORITY_SEPARATOR);
        }
        out.push_str(a.as_str());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{CREATE, DELETE, READ, REFACTOR, UPDATE};
    use crate::RoleName;

    fn principal_with(roles: Vec<Role>) -> Principal {
        Principal::active("Noe", "hash", roles)
    }

    #[test]
    fn roles_first_then_permissions_in_traversal_order() {
        let principal = principal_with(vec![Role::new(
            RoleName::Admin,
            [CREATE, READ, UPDATE, DELETE],
        )]);

        let authorities = assemble_authorities(&principal).unwrap();
        assert_eq!(
            encode_authorities(&authorities),
            "ROLE_ADMIN,CREATE,READ,UPDATE,DELETE"
        );
    }

    #[test]
    fn shared_permissions_are_not_deduplicated() {
        let principal = principal_with(vec![
            Role::new(RoleName::User, [READ]),
            Role::new(RoleName::Developer, [READ, REFACTOR]),
        ]);

        let authorities = assemble_authorities(&principal).unwrap();
        let rendered: Vec<&str> = authorities.iter().map(|a| a.as_str()).collect();
        assert_eq!(
            rendered,
            vec!["ROLE_USER", "ROLE_DEVELOPER", "READ", "READ", "REFACTOR"]
        );
    }

    #[test]
    fn role_without_permissions_still_yields_role_authority() {
        let principal = principal_with(vec![Role::new(RoleName::Invited, Vec::<crate::Permission>::new())]);
        let authorities = assemble_authorities(&principal).unwrap();
        assert_eq!(encode_authorities(&authorities), "ROLE_INVITED");
    }

    #[test]
    fn empty_role_set_is_rejected() {
        let principal = principal_with(vec![]);
        assert_eq!(assemble_authorities(&principal), Err(AuthError::EmptyRoleSet));
    }

    #[test]
    fn assembly_is_reproducible() {
        let principal = principal_with(vec![
            Role::new(RoleName::Developer, [CREATE, READ, REFACTOR]),
            Role::new(RoleName::Invited, [READ]),
        ]);
        let a = encode_authorities(&assemble_authorities(&principal).unwrap());
        let b = encode_authorities(&assemble_authorities(&principal).unwrap());
        assert_eq!(a, b);
    }
}
