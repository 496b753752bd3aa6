//! Access token claims as seen by the client.
//!
//! The client never holds the signing secret. It only reads the payload to
//! learn who the session belongs to; every request is still verified by the
//! backend.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Error type for session token handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// Claims embedded in a backend access token.
///
/// Every field is optional because different backend deployments issue
/// slightly different payloads.
///
/// # Fields
///
/// - `sub`: User ID (also accepted as `id` or `userId`)
/// - `email`: User's email address
/// - `role`: Role name (`student`, `teacher`, `admin`)
/// - `role_ids`: Assigned role identifiers (also accepted as `roleIds`)
/// - `exp`: Token expiration timestamp
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, alias = "id", alias = "userId")]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, alias = "roleIds")]
    pub role_ids: Vec<String>,
    #[serde(default)]
    pub exp: Option<u64>,
}

/// Decodes a token's claims without verifying its signature or expiry.
pub fn decode_claims(token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    fn sign(payload: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(b"server-side-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_without_secret() {
        let token = sign(json!({
            "sub": "u-1",
            "email": "ada@school.test",
            "role": "teacher",
            "role_ids": ["r-3"],
            "exp": 1
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("u-1"));
        assert_eq!(claims.role.as_deref(), Some("teacher"));
        assert_eq!(claims.role_ids, vec!["r-3".to_string()]);
        // Expired tokens still decode; the backend decides validity
        assert_eq!(claims.exp, Some(1));
    }

    #[test]
    fn test_decode_camel_case_aliases() {
        let token = sign(json!({"userId": "u-9", "roleIds": ["a", "b"]}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("u-9"));
        assert_eq!(claims.role_ids.len(), 2);
        assert!(claims.role.is_none());
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_claims("not-a-token").unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }
}
