//! Access decisions over a request's authorization context.
//!
//! - No IO
//! - No panics
//! - Fail closed: absent context denies everything except `PermitAll`

use std::collections::HashMap;

use crate::AuthorizationContext;

/// Declarative rule attached to a resource or an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessRule {
    RequireAuthority(String),
    /// Role names without the `ROLE_` prefix.
    RequireAnyRole(Vec<String>),
    DenyAll,
    PermitAll,
}

impl AccessRule {
    pub fn require_authority(name: impl Into<String>) -> Self {
        Self::RequireAuthority(name.into())
    }

    pub fn require_any_role<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::RequireAnyRole(names.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Deny,
}

/// Evaluate a single rule.
pub fn decide(rule: &AccessRule, context: Option<&AuthorizationContext>) -> Decision {
    let permitted = match (rule, context) {
        (AccessRule::PermitAll, _) => true,
        (AccessRule::DenyAll, _) => false,
        (_, None) => false,
        (AccessRule::RequireAuthority(name), Some(ctx)) => ctx.has_authority(name),
        (AccessRule::RequireAnyRole(names), Some(ctx)) => ctx.has_any_role(names),
    };

    if permitted { Decision::Permit } else { Decision::Deny }
}

/// Rules for one resource: a baseline plus per-operation overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePolicy {
    pub baseline: AccessRule,
    pub operations: HashMap<String, AccessRule>,
}

impl ResourcePolicy {
    pub fn new(baseline: AccessRule) -> Self {
        Self {
            baseline,
            operations: HashMap::new(),
        }
    }

    /// An operation rule replaces the baseline; it is not combined with it.
    pub fn with_operation(mut self, operation: impl Into<String>, rule: AccessRule) -> Self {
        self.operations.insert(operation.into(), rule);
        self
    }
}

/// Mapping from resource and operation identifiers to rules.
///
/// Unclassified resources resolve to `DenyAll`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    resources: HashMap<String, ResourcePolicy>,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, resource: impl Into<String>, policy: ResourcePolicy) -> Self {
        self.resources.insert(resource.into(), policy);
        self
    }

    pub fn rule_for(&self, resource: &str, operation: &str) -> &AccessRule {
        const DENY_ALL: &AccessRule = &AccessRule::DenyAll;

        match self.resources.get(resource) {
            Some(policy) => policy.operations.get(operation).unwrap_or(&policy.baseline),
            None => DENY_ALL,
        }
    }
}

/// Gate consulted before an operation runs.
#[derive(Debug, Clone, Default)]
pub struct AccessDecisionEngine {
    policy: AccessPolicy,
}

impl AccessDecisionEngine {
    pub fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn decide_operation(
        &self,
        resource: &str,
        operation: &str,
        context: Option<&AuthorizationContext>,
    ) -> Decision {
        let rule = self.policy.rule_for(resource, operation);
        let decision = decide(rule, context);

        tracing::debug!(
            resource,
            operation,
            ?rule,
            ?decision,
            identity = context.map(|c| c.identity()),
            "access decision"
        );

        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_context() -> AuthorizationContext {
        AuthorizationContext::new("Noe", ["ROLE_ADMIN", "CREATE", "READ", "UPDATE", "DELETE"])
    }

    #[test]
    fn require_authority_needs_matching_authority() {
        let ctx = admin_context();
        assert_eq!(decide(&AccessRule::require_authority("CREATE"), Some(&ctx)), Decision::Permit);
        assert_eq!(decide(&AccessRule::require_authority("REFACTOR"), Some(&ctx)), Decision::Deny);
    }

    #[test]
    fn require_any_role_checks_prefixed_roles() {
        let ctx = admin_context();
        assert_eq!(decide(&AccessRule::require_any_role(["USER"]), Some(&ctx)), Decision::Deny);
        assert_eq!(
            decide(&AccessRule::require_any_role(["DEVELOPER", "ADMIN"]), Some(&ctx)),
            Decision::Permit
        );
    }

    #[test]
    fn deny_all_denies_even_full_authority() {
        let ctx = admin_context();
        assert_eq!(decide(&AccessRule::DenyAll, Some(&ctx)), Decision::Deny);
        assert_eq!(decide(&AccessRule::DenyAll, None), Decision::Deny);
    }

    #[test]
    fn absent_context_only_passes_permit_all() {
        assert_eq!(decide(&AccessRule::PermitAll, None), Decision::Permit);
        assert_eq!(decide(&AccessRule::require_authority("READ"), None), Decision::Deny);
        assert_eq!(decide(&AccessRule::require_any_role(["ADMIN"]), None), Decision::Deny);
    }

    #[test]
    fn operation_rule_overrides_baseline() {
        let policy = AccessPolicy::new().with_resource(
            "method",
            ResourcePolicy::new(AccessRule::DenyAll)
                .with_operation("GET /method/get", AccessRule::require_authority("READ")),
        );
        let engine = AccessDecisionEngine::new(policy);
        let reader = AuthorizationContext::new("Paul", ["ROLE_USER", "READ"]);

        assert_eq!(
            engine.decide_operation("method", "GET /method/get", Some(&reader)),
            Decision::Permit
        );
        assert_eq!(
            engine.decide_operation("method", "PUT /method/put", Some(&reader)),
            Decision::Deny
        );
    }

    #[test]
    fn override_can_be_stricter_than_baseline() {
        let policy = AccessPolicy::new().with_resource(
            "system",
            ResourcePolicy::new(AccessRule::PermitAll)
                .with_operation("GET /whoami", AccessRule::require_authority("READ")),
        );
        let engine = AccessDecisionEngine::new(policy);

        assert_eq!(engine.decide_operation("system", "GET /health", None), Decision::Permit);
        assert_eq!(engine.decide_operation("system", "GET /whoami", None), Decision::Deny);
    }

    #[test]
    fn unknown_resource_falls_back_to_deny_all() {
        let engine = AccessDecisionEngine::new(AccessPolicy::new());
        let ctx = admin_context();
        assert_eq!(engine.policy().rule_for("billing", "GET /billing"), &AccessRule::DenyAll);
        assert_eq!(engine.decide_operation("billing", "GET /billing", Some(&ctx)), Decision::Deny);
    }
}
