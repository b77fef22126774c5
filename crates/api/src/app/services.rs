//! Service wiring: directory, hasher, issuer/validator, access policy.

use std::sync::Arc;

use sentinel_auth::service::seed_demo_users;
use sentinel_auth::{
    AccessDecisionEngine, Argon2PasswordHasher, AuthResult, AuthService, Hs256TokenValidator,
    InMemoryDirectory, TokenValidator,
};

use crate::authz::default_policy;
use crate::config::ApiConfig;

pub struct AppServices {
    pub auth: AuthService,
    pub validator: Arc<dyn TokenValidator>,
    pub engine: Arc<AccessDecisionEngine>,
}

pub fn build_services(config: &ApiConfig) -> AuthResult<AppServices> {
    let directory = Arc::new(InMemoryDirectory::with_default_roles());
    let hasher = Arc::new(Argon2PasswordHasher::new());

    if let Some(password) = &config.seed_demo_password {
        let created = seed_demo_users(directory.as_ref(), directory.as_ref(), hasher.as_ref(), password)?;
        tracing::info!(created, "seeded demo users");
    }

    let auth = AuthService::new(directory.clone(), directory.clone(), hasher, &config.token)?;

    Ok(AppServices {
        auth,
        validator: Arc::new(Hs256TokenValidator::new(&config.token)),
        engine: Arc::new(AccessDecisionEngine::new(default_policy())),
    })
}
