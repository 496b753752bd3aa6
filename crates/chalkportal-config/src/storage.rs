//! Local storage configuration.
//!
//! The local backend keeps each resource collection as a JSON array file
//! under a single directory.
//!
//! # Environment Variables
//!
//! - `LOCAL_STORAGE_DIR`: Directory for collection files (default: `storage/local`)
//! - `LOCAL_PARENT_FIELDS`: Comma-separated `resource=field` pairs naming the
//!   field that scoped reads filter on (default: none, scoped reads fall back
//!   to `parentId`)

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

const DEFAULT_DIR: &str = "storage/local";
const DEFAULT_PARENT_FIELD: &str = "parentId";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub base_dir: PathBuf,
    pub parent_fields: HashMap<String, String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_DIR),
            parent_fields: HashMap::new(),
        }
    }
}

impl StorageConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_dir = lookup("LOCAL_STORAGE_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR));

        let parent_fields = lookup("LOCAL_PARENT_FIELDS")
            .map(|raw| parse_parent_fields(&raw))
            .unwrap_or_default();

        Self {
            base_dir,
            parent_fields,
        }
    }

    #[must_use]
    pub fn with_parent_field(mut self, resource: &str, field: &str) -> Self {
        self.parent_fields
            .insert(resource.to_string(), field.to_string());
        self
    }

    /// Field a scoped read filters on for the given resource.
    pub fn parent_field(&self, resource: &str) -> &str {
        self.parent_fields
            .get(resource)
            .map(String::as_str)
            .unwrap_or(DEFAULT_PARENT_FIELD)
    }

    /// File holding the collection for a resource.
    pub fn collection_path(&self, resource: &str) -> PathBuf {
        let file_name = resource.replace(['/', '\\'], "_");
        self.base_dir.join(format!("{file_name}.json"))
    }
}

fn parse_parent_fields(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .filter_map(|pair| {
            let (resource, field) = pair.split_once('=')?;
            let (resource, field) = (resource.trim(), field.trim());
            (!resource.is_empty() && !field.is_empty())
                .then(|| (resource.to_string(), field.to_string()))
        })
        .collect()
}
