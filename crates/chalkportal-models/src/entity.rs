//! The entity contract shared by every cached resource.
//!
//! The store treats entities as opaque backend-owned records. The only thing
//! it needs from them is an optional identifier, used to suppress duplicate
//! appends on create.
//!
//! # Example
//!
//! ```ignore
//! use chalkportal_models::{Entity, Resource, Record};
//!
//! // Typed resource
//! assert_eq!(Class::KEY, "classes");
//!
//! // Dynamic record read straight from JSON
//! let record: Record = serde_json::from_str(r#"{"_id": "c1", "className": "Math"}"#)?;
//! assert_eq!(record.id().as_deref(), Some("c1"));
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Field names checked, in order, for a record's identifier.
pub const ID_FIELDS: [&str; 2] = ["id", "_id"];

/// A record that can live in a store collection.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The unique identifier, if the backend supplied one.
    fn id(&self) -> Option<Cow<'_, str>>;

    /// Whether two entities share an identifier. Entities without one never match.
    fn same_id(&self, other: &Self) -> bool {
        match (self.id(), other.id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// An entity with a well-known backend collection.
pub trait Resource: Entity {
    /// Resource key, the path segment after the API prefix.
    const KEY: &'static str;
}

/// Implements [`Entity`] and [`Resource`] for a struct with an `id: Option<String>` field.
macro_rules! define_resource {
    ($ty:ty, $key:literal) => {
        impl $crate::entity::Entity for $ty {
            fn id(&self) -> Option<::std::borrow::Cow<'_, str>> {
                self.id.as_deref().map(::std::borrow::Cow::Borrowed)
            }
        }

        impl $crate::entity::Resource for $ty {
            const KEY: &'static str = $key;
        }
    };
}

pub(crate) use define_resource;

/// A fully dynamic entity: any JSON object.
///
/// Non-object JSON values deserialize into an empty record under the `value` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct Record(pub Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                Self(map)
            }
        }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}

impl Entity for Record {
    fn id(&self) -> Option<Cow<'_, str>> {
        ID_FIELDS.iter().find_map(|field| match self.0.get(*field)? {
            Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            _ => None,
        })
    }
}
