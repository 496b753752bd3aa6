//! Resource keys.
//!
//! A resource key names a backend collection and is the path segment after
//! the API prefix (`/api/<key>`). It also keys the store's cached collections
//! and request sequence numbers.

use chalkportal_core::{StoreError, StoreResult};
use chalkportal_models::Resource;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Creates a key, trimming surrounding slashes and whitespace.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self(key.trim().trim_matches('/').to_string())
    }

    /// Parses a user-supplied key, rejecting empty keys and nested paths.
    pub fn parse(raw: &str) -> StoreResult<Self> {
        let key = Self::new(raw);
        if key.0.is_empty() {
            return Err(StoreError::validation("Resource key must not be empty"));
        }
        if key.0.contains('/') || key.0.contains("..") {
            return Err(StoreError::validation(format!(
                "Resource key '{}' must be a single path segment",
                key.0
            )));
        }
        Ok(key)
    }

    /// Key of a typed resource.
    pub fn of<T: Resource>() -> Self {
        Self::new(T::KEY)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl AsRef<str> for ResourceKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chalkportal_models::{AttendanceRecord, Class};

    #[test]
    fn test_key_of_resource() {
        assert_eq!(ResourceKey::of::<Class>().as_str(), "classes");
        assert_eq!(ResourceKey::of::<AttendanceRecord>().as_str(), "attendance");
    }

    #[test]
    fn test_new_trims_slashes() {
        assert_eq!(ResourceKey::new("/classes/").as_str(), "classes");
    }

    #[test]
    fn test_parse_rejects_bad_keys() {
        assert!(ResourceKey::parse("").is_err());
        assert!(ResourceKey::parse(" / ").is_err());
        assert!(ResourceKey::parse("students/c1").is_err());
        assert!(ResourceKey::parse("..").is_err());
        assert_eq!(ResourceKey::parse("tests").unwrap().to_string(), "tests");
    }
}
