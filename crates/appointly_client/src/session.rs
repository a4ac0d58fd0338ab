//! Admin login state.
//!
//! The token lives in memory only and is shared between the REST service and
//! whoever drives it, so clones of an [`AdminSession`] see the same token.

use appointly_common::{auth_error, AdminToken, AppointlyError};
use std::sync::{Arc, RwLock};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct AdminSession {
    token: Arc<RwLock<Option<AdminToken>>>,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<AdminToken> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Stores a token, or clears it when `None`.
    pub fn set_token(&self, token: Option<AdminToken>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }

    pub fn is_admin(&self) -> bool {
        self.token().is_some()
    }

    /// `Authorization` header value for the current token, if any.
    pub fn auth_header(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {}", t.as_str()))
    }

    /// Fails with "Admin access required" unless a token is held.
    pub fn require_admin(&self) -> Result<AdminToken, AppointlyError> {
        self.token()
            .ok_or_else(|| auth_error("Admin access required"))
    }

    pub fn logout(&self) {
        self.set_token(None);
        info!("Logged out");
    }

    /// Drops the token after the backend rejected it.
    pub(crate) fn expire(&self) -> AppointlyError {
        self.set_token(None);
        auth_error("Session expired")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_token() {
        let session = AdminSession::new();
        let other = session.clone();
        assert!(!other.is_admin());

        session.set_token(Some(AdminToken("abc".into())));
        assert!(other.is_admin());
        assert_eq!(other.auth_header().as_deref(), Some("Bearer abc"));

        other.logout();
        assert!(!session.is_admin());
        assert_eq!(session.auth_header(), None);
    }

    #[test]
    fn test_require_admin() {
        let session = AdminSession::new();
        let err = session.require_admin().unwrap_err();
        assert_eq!(err.user_message(), "Admin access required");

        session.set_token(Some(AdminToken("t".into())));
        assert_eq!(session.require_admin().unwrap().as_str(), "t");

        let expired = session.expire();
        assert_eq!(expired.user_message(), "Session expired");
        assert!(!session.is_admin());
    }
}
