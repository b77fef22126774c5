use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ValidationError;
use crate::assembler::AUTHORITY_SEPARATOR;

/// Claim set carried in every issued token.
///
/// Immutable once issued; a new token is always a new value. Field names on
/// the wire are the registered JWT names plus the custom `authorities` claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "iss")]
    pub issuer: String,

    /// Username of the authenticated principal.
    #[serde(rename = "sub")]
    pub subject: String,

    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,

    #[serde(rename = "nbf", with = "chrono::serde::ts_seconds")]
    pub not_before: DateTime<Utc>,

    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,

    #[serde(rename = "jti")]
    pub jwt_id: String,

    /// Comma-joined authority list.
    pub authorities: String,
}

impl TokenClaims {
    /// Authority segments of the claim, empty segments dropped.
    pub fn authority_segments(&self) -> impl Iterator<Item = &str> {
        self.authorities
            .split(AUTHORITY_SEPARATOR)
            .filter(|s| !s.is_empty())
    }
}

/// Check the validity window: `not_before <= now < expires_at`.
pub fn validate_window(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), ValidationError> {
    if now < claims.not_before {
        return Err(ValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(ValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn claims_at(start: DateTime<Utc>) -> TokenClaims {
        TokenClaims {
            issuer: "sentinel".to_string(),
            subject: "Noe".to_string(),
            issued_at: start,
            not_before: start,
            expires_at: start + Duration::minutes(30),
            jwt_id: "id".to_string(),
            authorities: "ROLE_ADMIN,,READ".to_string(),
        }
    }

    #[test]
    fn window_is_inclusive_start_exclusive_end() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let claims = claims_at(start);

        assert_eq!(validate_window(&claims, start), Ok(()));
        assert_eq!(
            validate_window(&claims, claims.expires_at - Duration::seconds(1)),
            Ok(())
        );
        assert_eq!(
            validate_window(&claims, claims.expires_at),
            Err(ValidationError::Expired)
        );
        assert_eq!(
            validate_window(&claims, start - Duration::seconds(1)),
            Err(ValidationError::NotYetValid)
        );
    }

    #[test]
    fn wire_names_are_registered_claims() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_value(claims_at(start)).unwrap();

        for key in ["iss", "sub", "iat", "nbf", "exp", "jti", "authorities"] {
            assert!(json.get(key).is_some(), "missing claim {key}");
        }
        assert_eq!(json["iat"], serde_json::json!(start.timestamp()));
    }

    #[test]
    fn empty_authority_segments_are_dropped() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let claims = claims_at(start);
        let segments: Vec<&str> = claims.authority_segments().collect();
        assert_eq!(segments, vec!["ROLE_ADMIN", "READ"]);
    }
}
