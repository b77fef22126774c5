//! Error model for authentication, issuance and validation.

use thiserror::Error;

/// Result type used across the auth core.
pub type AuthResult<T> = Result<T, AuthError>;

/// Failures of login, user creation and token issuance.
///
/// These propagate to the caller of the operation. Token *validation*
/// failures use [`ValidationError`] and never leave the authentication stage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Bad username or password. Does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Account disabled, locked or expired.
    #[error("account unavailable")]
    AccountUnavailable,

    /// Requested role names that do not exist.
    #[error("unknown roles: {}", .0.join(", "))]
    UnknownRoles(Vec<String>),

    /// A principal must resolve to at least one role.
    #[error("principal has no roles")]
    EmptyRoleSet,

    #[error("too many roles requested (max {max})")]
    TooManyRoles { max: usize },

    #[error("username already taken")]
    UsernameTaken,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Signing configuration is missing or unusable. Fatal.
    #[error("signing error: {0}")]
    Signing(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// The user/role directory failed.
    #[error("directory error: {0}")]
    Directory(String),
}

impl AuthError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn signing(msg: impl Into<String>) -> Self {
        Self::Signing(msg.into())
    }

    pub fn directory(msg: impl Into<String>) -> Self {
        Self::Directory(msg.into())
    }
}

/// Why a presented token was rejected.
///
/// Internal diagnostics only: at the HTTP boundary every variant collapses to
/// the same unauthorized outcome.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("malformed token")]
    Malformed,

    #[error("token signature mismatch")]
    SignatureMismatch,

    #[error("token issuer mismatch")]
    IssuerMismatch,

    #[error("token has expired")]
    Expired,

    #[error("token not yet valid")]
    NotYetValid,
}
