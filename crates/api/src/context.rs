use sentinel_auth::AuthorizationContext;

/// Outcome of request authentication, attached to every request.
///
/// `None` when no credential was presented or the token was rejected; the
/// access gate decides what that means for the operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestAuth(Option<AuthorizationContext>);

impl RequestAuth {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn bound(context: AuthorizationContext) -> Self {
        Self(Some(context))
    }

    pub fn context(&self) -> Option<&AuthorizationContext> {
        self.0.as_ref()
    }
}
