//! Error taxonomy for store and backend operations.
//!
//! Every failure a view can observe is one of four kinds:
//!
//! | Variant | Origin | Reaches the store's `error` field |
//! |---------|--------|-----------------------------------|
//! | [`StoreError::Transport`] | Network failure or undecodable response | Yes |
//! | [`StoreError::Server`] | Non-2xx HTTP status | Yes |
//! | [`StoreError::AuthExpired`] | HTTP 401 | No, handled globally |
//! | [`StoreError::Validation`] | Client-side check before any request | No |

use serde_json::Value;

/// Result alias used across the workspace.
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for store and backend operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Network unreachable, timeout, or a malformed response body.
    #[error("{0}")]
    Transport(String),

    /// Non-2xx response. `message` is the backend-supplied text when present.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The bearer token was rejected. Carries the login route for the
    /// session's role.
    #[error("Session expired, please log in again at {login_route}")]
    AuthExpired { login_route: String },

    /// Rejected before a request was issued.
    #[error("{0}")]
    Validation(String),
}

impl StoreError {
    pub fn transport<E: std::fmt::Display>(err: E) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::server(404, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn auth_expired(login_route: impl Into<String>) -> Self {
        Self::AuthExpired {
            login_route: login_route.into(),
        }
    }

    /// Human-readable message, as stored in a store's `error` field.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired { .. })
    }

    /// HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::AuthExpired { .. } => Some(401),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(format!("Malformed response: {err}"))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Extracts the backend's structured error message from a response body.
///
/// Looks at `error` first, then `message`. A nested `{"error": {"message": ..}}`
/// object is also accepted.
pub fn extract_error_message(body: &Value) -> Option<String> {
    let field = body.get("error").or_else(|| body.get("message"))?;

    match field {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(inner) => inner
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_error_message_is_backend_text() {
        let err = StoreError::server(403, "Forbidden");
        assert_eq!(err.message(), "Forbidden");
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_transport_error_message() {
        let err = StoreError::transport("connection refused");
        assert_eq!(err.message(), "connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_auth_expired() {
        let err = StoreError::auth_expired("/login/student");
        assert!(err.is_auth_expired());
        assert_eq!(err.status(), Some(401));
        assert!(err.message().contains("/login/student"));
    }

    #[test]
    fn test_extract_error_field() {
        let body = json!({"error": "Forbidden"});
        assert_eq!(extract_error_message(&body), Some("Forbidden".to_string()));
    }

    #[test]
    fn test_extract_falls_back_to_message() {
        let body = json!({"message": "Class not found"});
        assert_eq!(
            extract_error_message(&body),
            Some("Class not found".to_string())
        );
    }

    #[test]
    fn test_extract_nested_error_object() {
        let body = json!({"error": {"message": "Duplicate roll number"}});
        assert_eq!(
            extract_error_message(&body),
            Some("Duplicate roll number".to_string())
        );
    }

    #[test]
    fn test_extract_none_when_absent_or_empty() {
        assert_eq!(extract_error_message(&json!({"data": []})), None);
        assert_eq!(extract_error_message(&json!({"error": ""})), None);
        assert_eq!(extract_error_message(&json!([1, 2])), None);
    }

    #[test]
    fn test_malformed_json_is_transport() {
        let err: StoreError = serde_json::from_str::<Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, StoreError::Transport(_)));
    }
}
