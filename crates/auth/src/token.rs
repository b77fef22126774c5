//! Signed token issuance and validation (HS256).
//!
//! The validator is a pure function of the token, the supplied `now` and the
//! injected [`TokenConfig`]. Checks run in a fixed order and stop at the
//! first failure: structure, signature, issuer, time window.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, SubsecRound, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::assembler::encode_authorities;
use crate::claims::validate_window;
use crate::config::token_ttl;
use crate::{AuthError, AuthResult, Authority, TokenClaims, TokenConfig, ValidationError};

/// An issued token together with the claims it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub claims: TokenClaims,
    pub token: String,
}

/// Builds and signs access tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    issuer: String,
    encoding_key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            issuer: config.issuer().to_string(),
            encoding_key: EncodingKey::from_secret(config.secret_bytes()),
        }
    }

    /// Issue a token valid from `now` for the fixed TTL.
    ///
    /// Timestamps are truncated to whole seconds so the returned claims equal
    /// what a validator decodes.
    pub fn issue(
        &self,
        identity: &str,
        authorities: &[Authority],
        now: DateTime<Utc>,
    ) -> AuthResult<IssuedToken> {
        let now = now.trunc_subsecs(0);
        let claims = TokenClaims {
            issuer: self.issuer.clone(),
            subject: identity.to_string(),
            issued_at: now,
            not_before: now,
            expires_at: now + token_ttl(),
            jwt_id: Uuid::new_v4().to_string(),
            authorities: encode_authorities(authorities),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::signing(format!("failed to sign token: {e}")))?;

        tracing::debug!(subject = %claims.subject, jti = %claims.jwt_id, "issued access token");

        Ok(IssuedToken { claims, token })
    }
}

/// Seam used by the request pipeline to validate bearer tokens.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, ValidationError>;
}

/// HS256 validator keyed by the process-wide secret.
#[derive(Clone)]
pub struct Hs256TokenValidator {
    issuer: String,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Hs256TokenValidator {
    pub fn new(config: &TokenConfig) -> Self {
        // Time and issuer checks run against the caller's `now` below, so the
        // library only decodes and verifies the MAC.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);

        Self {
            issuer: config.issuer().to_string(),
            decoding_key: DecodingKey::from_secret(config.secret_bytes()),
            validation,
        }
    }
}

impl TokenValidator for Hs256TokenValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, ValidationError> {
        check_structure(token)?;

        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    ValidationError::SignatureMismatch
                }
                _ => ValidationError::Malformed,
            })?;

        let claims = data.claims;
        if claims.issuer != self.issuer {
            return Err(ValidationError::IssuerMismatch);
        }
        validate_window(&claims, now)?;

        Ok(claims)
    }
}

/// Three non-empty base64url segments with a decodable header.
fn check_structure(token: &str) -> Result<(), ValidationError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, signature] = segments.as_slice() else {
        return Err(ValidationError::Malformed);
    };
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ValidationError::Malformed);
    }

    jsonwebtoken::decode_header(token).map_err(|_| ValidationError::Malformed)?;
    for segment in [payload, signature] {
        URL_SAFE_NO_PAD
            .decode(segment)
            .map_err(|_| ValidationError::Malformed)?;
    }
    Ok(())
}
