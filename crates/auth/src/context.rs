use std::collections::HashSet;

use crate::TokenClaims;
use crate::principal::ROLE_PREFIX;

/// Request-scoped identity and authority set, rebuilt from a validated token.
///
/// Never persisted; lives for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationContext {
    identity: String,
    authorities: HashSet<String>,
}

impl AuthorizationContext {
    pub fn new<I, S>(identity: impl Into<String>, authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identity: identity.into(),
            authorities: authorities.into_iter().map(Into::into).collect(),
        }
    }

    /// Callers must only pass claims that have already been validated.
    pub fn from_claims(claims: &TokenClaims) -> Self {
        Self::new(claims.subject.clone(), claims.authority_segments())
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn has_authority(&self, name: &str) -> bool {
        self.authorities.contains(name)
    }

    /// True if the context holds `ROLE_<name>` for at least one name.
    pub fn has_any_role<I, S>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .any(|n| self.authorities.contains(&format!("{ROLE_PREFIX}{}", n.as_ref())))
    }

    /// Authorities in sorted order (for display).
    pub fn authorities(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.authorities.iter().map(String::as_str).collect();
        out.sort_unstable();
        out
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn claims(authorities: &str) -> TokenClaims {
        let now = Utc::now();
        TokenClaims {
            issuer: "sentinel".to_string(),
            subject: "Noe".to_string(),
            issued_at: now,
            not_before: now,
            expires_at: now,
            jwt_id: "jti".to_string(),
            authorities: authorities.to_string(),
        }
    }

    #[test]
    fn context_splits_authorities_claim() {
        let ctx = AuthorizationContext::from_claims(&claims("ROLE_ADMIN,CREATE,READ"));
        assert_eq!(ctx.identity(), "Noe");
        assert!(ctx.has_authority("CREATE"));
        assert!(ctx.has_authority("ROLE_ADMIN"));
        assert!(!ctx.has_authority("DELETE"));
    }

    #[test]
    fn role_check_applies_prefix() {
        let ctx = AuthorizationContext::from_claims(&claims("ROLE_ADMIN,READ"));
        assert!(ctx.has_any_role(["USER", "ADMIN"]));
        assert!(!ctx.has_any_role(["USER"]));
        // Bare permission is not a role.
        assert!(!ctx.has_any_role(["READ"]));
        assert!(!ctx.has_authority("ADMIN"));
    }

    #[test]
    fn empty_segments_and_duplicates_collapse() {
        let ctx = AuthorizationContext::from_claims(&claims(",READ,,READ,"));
        assert_eq!(ctx.authorities(), vec!["READ"]);
    }

    #[test]
    fn empty_claim_yields_no_authorities() {
        let ctx = AuthorizationContext::from_claims(&claims(""));
        assert!(ctx.authorities().is_empty());
        assert!(!ctx.has_any_role(Vec::<String>::new()));
    }
}
