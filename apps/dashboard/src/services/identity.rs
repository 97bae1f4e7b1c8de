/// Source of the user id under which searches are recorded.
///
/// The dashboard has no notion of accounts; a real deployment plugs an
/// auth/session service in here.
pub trait IdentityProvider: Send + Sync {
    fn user_id(&self) -> &str;
}

/// Fixed id taken from configuration
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    user_id: String,
}

impl StaticIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn user_id(&self) -> &str {
        &self.user_id
    }
}
