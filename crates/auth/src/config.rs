//! Process-wide signing configuration.

use chrono::Duration;

use crate::{AuthError, AuthResult};

/// Lifetime of every issued token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 30 * 60;

pub fn token_ttl() -> Duration {
    Duration::seconds(TOKEN_TTL_SECS)
}

/// Signing secret and issuer, built once at startup and injected into the
/// issuer and validator. Read-only afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenConfig {
    secret: String,
    issuer: String,
}

impl TokenConfig {
    /// Fails with [`AuthError::Signing`] when the secret or issuer is empty.
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>) -> AuthResult<Self> {
        let secret = secret.into();
        let issuer = issuer.into();

        if secret.is_empty() {
            return Err(AuthError::signing("signing secret is not configured"));
        }
        if issuer.is_empty() {
            return Err(AuthError::signing("token issuer is not configured"));
        }
        if secret.len() < 32 {
            tracing::warn!("signing secret is shorter than recommended (32 bytes)");
        }

        Ok(Self { secret, issuer })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl core::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_is_a_signing_error() {
        let err = TokenConfig::new("", "sentinel").unwrap_err();
        assert!(matches!(err, AuthError::Signing(_)));
    }

    #[test]
    fn empty_issuer_is_a_signing_error() {
        let err = TokenConfig::new("0123456789abcdef0123456789abcdef", "").unwrap_err();
        assert!(matches!(err, AuthError::Signing(_)));
    }

    #[test]
    fn debug_output_hides_secret() {
        let config = TokenConfig::new("super-secret-value-that-is-long-enough", "sentinel").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("sentinel"));
    }
}
