//! The current session, injected into store backends.
//!
//! Backends read the bearer token through a [`SessionContext`] handed to them
//! at construction instead of reaching into global storage. All clones of a
//! context share the same session, so clearing it after a rejected token is
//! visible everywhere.

use chalkportal_config::LoginRoutes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

use crate::claims::{AuthError, decode_claims};

/// Portal role of the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }

    /// Login route to report when a session with this role expires.
    pub fn login_route<'a>(&self, routes: &'a LoginRoutes) -> &'a str {
        match self {
            Role::Student => &routes.student,
            Role::Teacher => &routes.teacher,
            Role::Admin => &routes.admin,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" | "faculty" => Ok(Role::Teacher),
            "admin" | "school_admin" | "system_admin" => Ok(Role::Admin),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}

/// An authenticated session: the bearer token plus what is known about its owner.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Option<Role>,
    pub user_id: Option<String>,
    pub role_ids: Vec<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("role", &self.role)
            .field("user_id", &self.user_id)
            .field("role_ids", &self.role_ids)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// A session from an opaque token and an explicitly known role.
    pub fn new(token: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            token: token.into(),
            role,
            user_id: None,
            role_ids: Vec::new(),
        }
    }

    /// A session whose owner is read from the token's claims.
    ///
    /// An unrecognized role name leaves `role` empty rather than failing.
    pub fn from_token(token: impl Into<String>) -> Result<Self, AuthError> {
        let token = token.into();
        let claims = decode_claims(&token)?;
        let role = claims.role.as_deref().and_then(|r| r.parse().ok());

        Ok(Self {
            token,
            role,
            user_id: claims.sub,
            role_ids: claims.role_ids,
        })
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Shared handle to the current session.
#[derive(Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<Session>>>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("session", &self.current())
            .finish()
    }
}

impl SessionContext {
    /// An empty (signed-out) context.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        let context = Self::new();
        context.set(session);
        context
    }

    pub fn set(&self, session: Session) {
        debug!(role = ?session.role, "Session set");
        *self.write() = Some(session);
    }

    /// Removes the session, returning what was there.
    pub fn clear(&self) -> Option<Session> {
        let previous = self.write().take();
        if let Some(ref session) = previous {
            info!(role = ?session.role, "Session cleared");
        }
        previous
    }

    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.read().as_ref().and_then(|s| s.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Login route for the current session's role, or the fallback route.
    pub fn login_route(&self, routes: &LoginRoutes) -> String {
        self.role()
            .map(|role| role.login_route(routes).to_string())
            .unwrap_or_else(|| routes.fallback.clone())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("Student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!("faculty".parse::<Role>().unwrap(), Role::Teacher);
        assert_eq!("school_admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("janitor".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&Role::Teacher).unwrap();
        assert_eq!(json, r#""teacher""#);
        let role: Role = serde_json::from_str(r#""student""#).unwrap();
        assert_eq!(role, Role::Student);
    }

    #[test]
    fn test_session_from_token() {
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &serde_json::json!({"sub": "u-7", "role": "student", "role_ids": ["r-4"]}),
            &jsonwebtoken::EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let session = Session::from_token(token.clone()).unwrap();
        assert_eq!(session.token, token);
        assert_eq!(session.role, Some(Role::Student));
        assert_eq!(session.user_id.as_deref(), Some("u-7"));
        assert_eq!(session.role_ids, vec!["r-4".to_string()]);
    }

    #[test]
    fn test_bearer_header() {
        let session = Session::new("abc", Some(Role::Student));
        assert_eq!(session.bearer(), "Bearer abc");
    }

    #[test]
    fn test_debug_hides_token() {
        let session = Session::new("super-secret", None);
        assert!(!format!("{session:?}").contains("super-secret"));
    }

    #[test]
    fn test_clones_share_state() {
        let context = SessionContext::new();
        let other = context.clone();
        assert!(!other.is_authenticated());

        context.set(Session::new("t", Some(Role::Teacher)));
        assert_eq!(other.token().as_deref(), Some("t"));
        assert_eq!(other.role(), Some(Role::Teacher));

        let cleared = other.clear();
        assert!(cleared.is_some());
        assert!(!context.is_authenticated());
        assert!(context.clear().is_none());
    }

    #[test]
    fn test_login_route_by_role() {
        let routes = LoginRoutes::default();
        let context = SessionContext::with_session(Session::new("t", Some(Role::Teacher)));
        assert_eq!(context.login_route(&routes), "/teacher/login");

        let anonymous = SessionContext::with_session(Session::new("t", None));
        assert_eq!(anonymous.login_route(&routes), "/");
    }
}
