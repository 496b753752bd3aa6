//! Local filesystem backend.
//!
//! Each collection is one JSON array file under
//! [`StorageConfig::base_dir`]. Writes go to a temporary file that is then
//! renamed over the collection, so a crash never leaves a half-written file.
//!
//! Scoped reads filter on the resource's configured parent field (see
//! [`StorageConfig::parent_field`]); date ranges filter on the `date` field.
//! Named actions are not supported and fail with a 404-style error.

use async_trait::async_trait;
use chalkportal_config::StorageConfig;
use chalkportal_core::{FetchParams, StoreError, StoreResult};
use chalkportal_models::{Entity, ID_FIELDS};
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::backend::ResourceBackend;
use crate::keys::ResourceKey;

const DATE_FIELD: &str = "date";

/// Store backend persisting collections as JSON files.
#[derive(Debug)]
pub struct LocalBackend {
    config: StorageConfig,
    /// Serializes read-modify-write cycles on collection files.
    write_lock: Mutex<()>,
}

impl LocalBackend {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// File of a collection. Keys that are not a single path segment are rejected.
    fn path_for(&self, key: &ResourceKey) -> StoreResult<PathBuf> {
        let key = ResourceKey::parse(key.as_str())?;
        Ok(self.config.collection_path(key.as_str()))
    }

    /// Reads a collection file. A missing file is an empty collection.
    async fn load(&self, key: &ResourceKey) -> StoreResult<Vec<Value>> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &ResourceKey, records: &[Value]) -> StoreResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.config.base_dir).await?;

        let tmp_path = temp_path(&path);
        let json = serde_json::to_vec_pretty(records)?;
        fs::write(&tmp_path, json).await?;
        fs::rename(&tmp_path, &path).await?;

        debug!(path = %path.display(), records = records.len(), "Collection saved");
        Ok(())
    }

    fn matches(&self, key: &ResourceKey, record: &Value, params: &FetchParams) -> bool {
        if let Some(parent) = params.path_suffix() {
            let field = self.config.parent_field(key.as_str());
            if field_as_string(record, field).as_deref() != Some(parent) {
                return false;
            }
        }

        if params.from.is_some() || params.to.is_some() {
            match record_date(record) {
                Some(date) if params.contains_date(date) => {}
                _ => return false,
            }
        }

        params
            .filters
            .iter()
            .all(|(field, value)| field_as_string(record, field).as_deref() == Some(value.as_str()))
    }
}

fn temp_path(path: &std::path::Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// String form of a scalar field. Numbers and booleans are stringified.
fn field_as_string(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// The record's `date`, read from its leading `YYYY-MM-DD`.
fn record_date(record: &Value) -> Option<NaiveDate> {
    let raw = record.get(DATE_FIELD)?.as_str()?;
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn record_id(record: &Value) -> Option<String> {
    ID_FIELDS
        .iter()
        .find_map(|field| field_as_string(record, field).filter(|id| !id.is_empty()))
}

fn to_object<P: Serialize>(payload: &P) -> StoreResult<Map<String, Value>> {
    match serde_json::to_value(payload)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::server(400, "Payload must be a JSON object")),
    }
}

fn not_found(key: &ResourceKey, id: &str) -> StoreError {
    StoreError::not_found(format!("No {key} record with id '{id}'"))
}

#[async_trait]
impl ResourceBackend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    #[instrument(skip(self), fields(backend = "local"))]
    async fn fetch_all<T: Entity>(
        &self,
        key: &ResourceKey,
        params: &FetchParams,
    ) -> StoreResult<Vec<T>> {
        let records = self.load(key).await?;
        let total = records.len();

        let matching: Vec<Value> = records
            .into_iter()
            .filter(|record| self.matches(key, record, params))
            .collect();
        debug!(total, matching = matching.len(), "Collection read");

        Ok(serde_json::from_value(Value::Array(matching))?)
    }

    async fn create<T, P>(&self, key: &ResourceKey, payload: &P) -> StoreResult<T>
    where
        T: Entity,
        P: Serialize + Sync,
    {
        let mut record = Value::Object(to_object(payload)?);
        if record_id(&record).is_none()
            && let Value::Object(object) = &mut record
        {
            for field in ID_FIELDS {
                object.remove(field);
            }
            object.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }

        let _guard = self.write_lock.lock().await;
        let mut records = self.load(key).await?;
        records.push(record.clone());
        self.save(key, &records).await?;

        Ok(serde_json::from_value(record)?)
    }

    async fn update<T, P>(&self, key: &ResourceKey, id: &str, payload: &P) -> StoreResult<T>
    where
        T: Entity,
        P: Serialize + Sync,
    {
        let changes = to_object(payload)?;

        let _guard = self.write_lock.lock().await;
        let mut records = self.load(key).await?;
        let record = records
            .iter_mut()
            .find(|record| record_id(record).as_deref() == Some(id))
            .ok_or_else(|| not_found(key, id))?;

        if let Value::Object(existing) = record {
            existing.extend(changes);
        }
        let updated = record.clone();
        self.save(key, &records).await?;

        Ok(serde_json::from_value(updated)?)
    }

    async fn delete(&self, key: &ResourceKey, id: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load(key).await?;
        let before = records.len();
        records.retain(|record| record_id(record).as_deref() != Some(id));

        if records.len() == before {
            return Err(not_found(key, id));
        }
        self.save(key, &records).await
    }

    async fn perform<P, R>(&self, key: &ResourceKey, action: &str, _payload: &P) -> StoreResult<R>
    where
        P: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        Err(StoreError::not_found(format!(
            "Unknown action '{action}' on {key}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_date_reads_leading_day() {
        assert_eq!(
            record_date(&json!({"date": "2024-03-05T10:00:00.000Z"})),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(record_date(&json!({"date": "yesterday"})), None);
        assert_eq!(record_date(&json!({})), None);
    }

    #[test]
    fn test_record_id_accepts_both_fields() {
        assert_eq!(record_id(&json!({"_id": "a"})).as_deref(), Some("a"));
        assert_eq!(record_id(&json!({"id": 4})).as_deref(), Some("4"));
        assert_eq!(record_id(&json!({"id": ""})), None);
    }

    #[test]
    fn test_temp_path_sits_next_to_collection() {
        let path = PathBuf::from("/data/classes.json");
        assert_eq!(temp_path(&path), PathBuf::from("/data/classes.json.tmp"));
    }

    #[test]
    fn test_to_object_rejects_scalars() {
        let err = to_object(&json!([1, 2])).unwrap_err();
        assert_eq!(err.status(), Some(400));
    }
}
