//! One-way password hashing contract.

use argon2::Argon2;
use argon2::password_hash::{self, PasswordHash, PasswordVerifier, SaltString};
use rand::rngs::OsRng;

use crate::{AuthError, AuthResult};

pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> AuthResult<String>;

    /// `false` for a wrong password and for an unparsable stored hash.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id with default parameters, PHC string output.
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> AuthResult<String> {
        use password_hash::PasswordHasher as _;

        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        self.argon2.verify_password(password.as_bytes(), &parsed).is_ok()
    }
}
