//! Storage backend abstraction for the resource store.
//!
//! The store owns caching, loading/error bookkeeping and change broadcast.
//! A backend only moves entities to and from wherever they are persisted, so
//! the persistence mechanism can be swapped without changing any view code:
//!
//! - [`HttpBackend`](crate::http::HttpBackend): the REST API
//! - [`LocalBackend`](crate::local::LocalBackend): JSON files on local disk

use async_trait::async_trait;
use chalkportal_core::{FetchParams, StoreResult};
use chalkportal_models::Entity;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::keys::ResourceKey;

/// Persistence operations backing a [`ResourceStore`](crate::store::ResourceStore).
#[async_trait]
pub trait ResourceBackend: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Reads a whole collection, optionally scoped and filtered.
    async fn fetch_all<T: Entity>(
        &self,
        key: &ResourceKey,
        params: &FetchParams,
    ) -> StoreResult<Vec<T>>;

    /// Creates an entity and returns it as persisted.
    async fn create<T, P>(&self, key: &ResourceKey, payload: &P) -> StoreResult<T>
    where
        T: Entity,
        P: Serialize + Sync;

    /// Updates the entity with the given identifier and returns it as persisted.
    async fn update<T, P>(&self, key: &ResourceKey, id: &str, payload: &P) -> StoreResult<T>
    where
        T: Entity,
        P: Serialize + Sync;

    /// Deletes the entity with the given identifier.
    async fn delete(&self, key: &ResourceKey, id: &str) -> StoreResult<()>;

    /// Runs a named action on a collection (`POST /api/<key>/<action>`).
    async fn perform<P, R>(&self, key: &ResourceKey, action: &str, payload: &P) -> StoreResult<R>
    where
        P: Serialize + Sync,
        R: DeserializeOwned + Send;
}
