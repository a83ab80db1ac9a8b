//! Auth sessions and admin route gating.
//!
//! Session issuance itself belongs to the hosted auth service; what the
//! storefront owns is the thin layer around it: an opaque session token,
//! an in-memory session registry, and the pure routing decision that
//! gates the back-office behind a session.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use kuyen_core::{Email, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token is unknown or was revoked.
    #[error("invalid session")]
    InvalidSession,
    /// The session registry lock was poisoned.
    #[error("session store lock poisoned")]
    Poisoned,
}

/// An opaque session token handed to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Generate a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl core::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role a session carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

/// An issued session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: SessionToken,
    pub user_id: UserId,
    pub email: Email,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
}

/// In-memory session registry.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionToken, AuthSession>>,
}

impl SessionStore {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a session for a user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Poisoned`] if the registry lock is poisoned.
    pub fn issue(&self, user_id: UserId, email: Email, role: Role) -> Result<AuthSession, AuthError> {
        let session = AuthSession {
            token: SessionToken::generate(),
            user_id,
            email,
            role,
            issued_at: Utc::now(),
        };

        let mut sessions = self.sessions.lock().map_err(|_| AuthError::Poisoned)?;
        sessions.insert(session.token, session.clone());
        Ok(session)
    }

    /// Look up a session by token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidSession`] for an unknown or revoked
    /// token.
    pub fn validate(&self, token: SessionToken) -> Result<AuthSession, AuthError> {
        let sessions = self.sessions.lock().map_err(|_| AuthError::Poisoned)?;
        sessions
            .get(&token)
            .cloned()
            .ok_or(AuthError::InvalidSession)
    }

    /// Revoke a session. Revoking an unknown token is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Poisoned`] if the registry lock is poisoned.
    pub fn revoke(&self, token: SessionToken) -> Result<(), AuthError> {
        let mut sessions = self.sessions.lock().map_err(|_| AuthError::Poisoned)?;
        sessions.remove(&token);
        Ok(())
    }
}

/// Where to send a request after gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Serve the requested route.
    Allow,
    /// No session on a protected route: send to the login page.
    RedirectToLogin,
    /// Already signed in on the login page: send to the dashboard.
    RedirectToDashboard,
}

/// Gate back-office routes behind a session.
///
/// Everything outside `/admin` passes through. `/admin/login` is the one
/// admin route an anonymous visitor may see; a signed-in visitor gets
/// bounced from it to the dashboard.
#[must_use]
pub fn gate_admin_route(path: &str, authenticated: bool) -> RouteDecision {
    if !path.starts_with("/admin") {
        return RouteDecision::Allow;
    }

    if path == "/admin/login" {
        return if authenticated {
            RouteDecision::RedirectToDashboard
        } else {
            RouteDecision::Allow
        };
    }

    if authenticated {
        RouteDecision::Allow
    } else {
        RouteDecision::RedirectToLogin
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store_with_session() -> (SessionStore, AuthSession) {
        let store = SessionStore::new();
        let session = store
            .issue(
                UserId::new(1),
                Email::parse("admin@kuyen.cl").unwrap(),
                Role::Admin,
            )
            .unwrap();
        (store, session)
    }

    #[test]
    fn test_issue_and_validate() {
        let (store, session) = store_with_session();
        let found = store.validate(session.token).unwrap();
        assert_eq!(found.user_id, UserId::new(1));
        assert_eq!(found.role, Role::Admin);
    }

    #[test]
    fn test_unknown_token_is_invalid() {
        let store = SessionStore::new();
        assert!(matches!(
            store.validate(SessionToken::generate()),
            Err(AuthError::InvalidSession)
        ));
    }

    #[test]
    fn test_revoked_token_is_invalid() {
        let (store, session) = store_with_session();
        store.revoke(session.token).unwrap();
        assert!(matches!(
            store.validate(session.token),
            Err(AuthError::InvalidSession)
        ));
    }

    #[test]
    fn test_tokens_are_unique() {
        let (store, a) = store_with_session();
        let b = store
            .issue(
                UserId::new(2),
                Email::parse("otra@kuyen.cl").unwrap(),
                Role::Customer,
            )
            .unwrap();
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn test_gate_public_routes_pass() {
        assert_eq!(gate_admin_route("/", false), RouteDecision::Allow);
        assert_eq!(gate_admin_route("/catalogo", false), RouteDecision::Allow);
        assert_eq!(gate_admin_route("/checkout", true), RouteDecision::Allow);
    }

    #[test]
    fn test_gate_admin_requires_session() {
        assert_eq!(
            gate_admin_route("/admin", false),
            RouteDecision::RedirectToLogin
        );
        assert_eq!(
            gate_admin_route("/admin/orders", false),
            RouteDecision::RedirectToLogin
        );
        assert_eq!(gate_admin_route("/admin/orders", true), RouteDecision::Allow);
    }

    #[test]
    fn test_gate_login_page() {
        assert_eq!(gate_admin_route("/admin/login", false), RouteDecision::Allow);
        assert_eq!(
            gate_admin_route("/admin/login", true),
            RouteDecision::RedirectToDashboard
        );
    }
}
