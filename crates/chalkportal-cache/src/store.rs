//! The shared resource store.
//!
//! A [`ResourceStore`] caches one collection per [`ResourceKey`] and tracks a
//! single `loading` flag and `error` message for every operation it runs.
//! Consumers hold cheap clones of the same store and observe it through
//! [`ResourceStore::subscribe`].
//!
//! # Ordering
//!
//! Every fetch, create, update and delete on a key takes the next request
//! sequence number for that key. A fetch response is applied only if its
//! number is still the latest issued when it settles; older responses are
//! stale and discarded from the cache (the caller still receives them).
//! Mutations always apply.
//!
//! An operation whose future is dropped before the backend answers (a
//! timeout, a losing `select!` branch, an aborted task) still leaves the
//! in-flight count, so `loading` always returns to false.
//!
//! # Session expiry
//!
//! A [`StoreError::AuthExpired`] never reaches the `error` field. The store
//! clears the session and calls the hook registered with
//! [`ResourceStore::on_auth_expired`] with the login route instead.

use chalkportal_auth::SessionContext;
use chalkportal_core::{FetchParams, StoreError, StoreResult};
use chalkportal_models::Entity;
use chalkportal_observability::{track_auth_expired, track_stale_response, track_store_operation};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, error, instrument, warn};

use crate::backend::ResourceBackend;
use crate::keys::ResourceKey;

/// Callback invoked with the login route when the session is rejected.
pub type AuthExpiredHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Snapshot of the store's shared flags, broadcast on every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    /// True while at least one operation is in flight.
    pub loading: bool,
    /// Number of operations in flight.
    pub pending: usize,
    /// Message of the most recent failure, cleared when the next operation starts.
    pub error: Option<String>,
    /// Incremented on every published change, collections included.
    pub revision: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePhase {
    Idle,
    Loading,
    Error,
}

impl StoreStatus {
    pub fn phase(&self) -> StorePhase {
        if self.loading {
            StorePhase::Loading
        } else if self.error.is_some() {
            StorePhase::Error
        } else {
            StorePhase::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
    Perform,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Operation::Fetch => "fetch",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Perform => "perform",
        }
    }

    /// Whether the operation takes a request sequence number.
    fn is_sequenced(self) -> bool {
        !matches!(self, Operation::Perform)
    }
}

#[derive(Default)]
struct StoreState {
    /// Each value is a `Vec<T>` for the entity type the key was last written with.
    collections: HashMap<ResourceKey, Box<dyn Any + Send + Sync>>,
    sequences: HashMap<ResourceKey, u64>,
    in_flight: usize,
    error: Option<String>,
    revision: u64,
}

impl StoreState {
    fn status(&self) -> StoreStatus {
        StoreStatus {
            loading: self.in_flight > 0,
            pending: self.in_flight,
            error: self.error.clone(),
            revision: self.revision,
        }
    }

    fn next_seq(&mut self, key: &ResourceKey) -> u64 {
        let seq = self.sequences.entry(key.clone()).or_insert(0);
        *seq += 1;
        *seq
    }

    fn is_latest(&self, key: &ResourceKey, seq: u64) -> bool {
        self.sequences.get(key).copied().unwrap_or(0) == seq
    }

    fn collection_mut<T: Entity>(&mut self, key: &ResourceKey) -> Option<&mut Vec<T>> {
        self.collections
            .get_mut(key)
            .and_then(|collection| collection.downcast_mut::<Vec<T>>())
    }

    fn replace_collection<T: Entity>(&mut self, key: &ResourceKey, entities: Vec<T>) {
        self.collections.insert(key.clone(), Box::new(entities));
    }

    fn append<T: Entity>(&mut self, key: &ResourceKey, entity: &T) {
        match self.collections.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(Box::new(vec![entity.clone()]));
            }
            Entry::Occupied(mut slot) => match slot.get_mut().downcast_mut::<Vec<T>>() {
                Some(collection) => {
                    if !collection.iter().any(|existing| existing.same_id(entity)) {
                        collection.push(entity.clone());
                    }
                }
                None => warn!(resource = %key, "Cached collection holds a different entity type, append skipped"),
            },
        }
    }

    fn patch<T: Entity>(&mut self, key: &ResourceKey, id: &str, entity: &T) {
        if let Some(collection) = self.collection_mut::<T>(key)
            && let Some(existing) = collection
                .iter_mut()
                .find(|existing| existing.id().as_deref() == Some(id))
        {
            *existing = entity.clone();
        }
    }

    fn remove<T: Entity>(&mut self, key: &ResourceKey, id: &str) {
        if let Some(collection) = self.collection_mut::<T>(key) {
            collection.retain(|existing| existing.id().as_deref() != Some(id));
        }
    }
}

struct Inner<B> {
    backend: B,
    session: SessionContext,
    state: Mutex<StoreState>,
    status: watch::Sender<StoreStatus>,
    auth_hook: Mutex<Option<AuthExpiredHook>>,
}

/// Shared cache of resource collections over a [`ResourceBackend`].
pub struct ResourceStore<B: ResourceBackend> {
    inner: Arc<Inner<B>>,
}

impl<B: ResourceBackend> Clone for ResourceStore<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: ResourceBackend> fmt::Debug for ResourceStore<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceStore")
            .field("backend", &self.inner.backend.name())
            .field("status", &self.state())
            .finish_non_exhaustive()
    }
}

impl<B: ResourceBackend> ResourceStore<B> {
    /// Creates an empty store: no collections, not loading, no error.
    pub fn new(backend: B, session: SessionContext) -> Self {
        let (status, _) = watch::channel(StoreStatus::default());

        Self {
            inner: Arc::new(Inner {
                backend,
                session,
                state: Mutex::new(StoreState::default()),
                status,
                auth_hook: Mutex::new(None),
            }),
        }
    }

    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    pub fn session(&self) -> &SessionContext {
        &self.inner.session
    }

    /// Registers the callback run when the backend rejects the session.
    /// Replaces any previous hook.
    pub fn on_auth_expired<F>(&self, hook: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        *lock(&self.inner.auth_hook) = Some(Arc::new(hook));
    }

    pub fn state(&self) -> StoreStatus {
        self.lock_state().status()
    }

    /// Receiver notified on every change of loading, error or cached collections.
    pub fn subscribe(&self) -> watch::Receiver<StoreStatus> {
        self.inner.status.subscribe()
    }

    /// Snapshot of a cached collection.
    ///
    /// Empty when the key was never loaded or was loaded as another entity type.
    pub fn collection<T: Entity>(&self, key: &ResourceKey) -> Vec<T> {
        self.lock_state()
            .collections
            .get(key)
            .and_then(|collection| collection.downcast_ref::<Vec<T>>())
            .cloned()
            .unwrap_or_default()
    }

    /// Resets `error` to `None`. Collections and loading are left alone.
    pub fn clear_error(&self) {
        let mut state = self.lock_state();
        if state.error.take().is_some() {
            self.publish(&mut state);
        }
    }

    /// Reads a whole collection and replaces the cached one with it.
    #[instrument(skip(self, params), fields(resource = %key))]
    pub async fn fetch_all<T: Entity>(
        &self,
        key: &ResourceKey,
        params: &FetchParams,
    ) -> StoreResult<Vec<T>> {
        let in_flight = self.begin(Operation::Fetch, key);
        let result = self.inner.backend.fetch_all::<T>(key, params).await;

        self.settle(in_flight, key, result, |state, entities| {
            state.replace_collection(key, entities.clone());
        })
    }

    /// Creates an entity and appends it unless one with the same id is cached.
    #[instrument(skip(self, payload), fields(resource = %key))]
    pub async fn create<T, P>(&self, key: &ResourceKey, payload: &P) -> StoreResult<T>
    where
        T: Entity,
        P: Serialize + Sync,
    {
        let in_flight = self.begin(Operation::Create, key);
        let result = self.inner.backend.create::<T, P>(key, payload).await;

        self.settle(in_flight, key, result, |state, entity| {
            state.append(key, entity);
        })
    }

    /// Updates an entity and patches the cached copy in place when present.
    #[instrument(skip(self, payload), fields(resource = %key))]
    pub async fn update<T, P>(&self, key: &ResourceKey, id: &str, payload: &P) -> StoreResult<T>
    where
        T: Entity,
        P: Serialize + Sync,
    {
        let in_flight = self.begin(Operation::Update, key);
        let result = self.inner.backend.update::<T, P>(key, id, payload).await;

        self.settle(in_flight, key, result, |state, entity| {
            state.patch(key, id, entity);
        })
    }

    /// Deletes an entity and removes it from the cached `Vec<T>`.
    #[instrument(skip(self), fields(resource = %key))]
    pub async fn delete<T: Entity>(&self, key: &ResourceKey, id: &str) -> StoreResult<()> {
        let in_flight = self.begin(Operation::Delete, key);
        let result = self.inner.backend.delete(key, id).await;

        self.settle(in_flight, key, result, |state, _| {
            state.remove::<T>(key, id);
        })
    }

    /// Runs a named backend action. Cached collections are not touched.
    #[instrument(skip(self, payload), fields(resource = %key))]
    pub async fn perform<P, R>(&self, key: &ResourceKey, action: &str, payload: &P) -> StoreResult<R>
    where
        P: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let in_flight = self.begin(Operation::Perform, key);
        let result = self
            .inner
            .backend
            .perform::<P, R>(key, action, payload)
            .await;

        self.settle(in_flight, key, result, |_, _| {})
    }

    fn begin(&self, operation: Operation, key: &ResourceKey) -> InFlight<'_, B> {
        let mut state = self.lock_state();
        state.in_flight += 1;
        state.error = None;
        let seq = operation.is_sequenced().then(|| state.next_seq(key));
        self.publish(&mut state);

        debug!(
            operation = operation.as_str(),
            seq,
            backend = self.inner.backend.name(),
            "Store operation started"
        );
        InFlight {
            store: self,
            operation,
            seq,
            settled: false,
        }
    }

    fn settle<R>(
        &self,
        mut in_flight: InFlight<'_, B>,
        key: &ResourceKey,
        result: StoreResult<R>,
        apply: impl FnOnce(&mut StoreState, &R),
    ) -> StoreResult<R> {
        let operation = in_flight.operation;
        let seq = in_flight.seq;

        let outcome = {
            let mut state = self.lock_state();
            state.in_flight = state.in_flight.saturating_sub(1);
            in_flight.settled = true;

            let stale = operation == Operation::Fetch
                && seq.is_some_and(|seq| !state.is_latest(key, seq));

            let outcome = match &result {
                Ok(_) if stale => "stale",
                Ok(value) => {
                    apply(&mut state, value);
                    "success"
                }
                Err(e) if e.is_auth_expired() => "auth_expired",
                Err(_) if stale => "stale",
                Err(e) => {
                    state.error = Some(e.message());
                    "error"
                }
            };

            self.publish(&mut state);
            outcome
        };

        track_store_operation(operation.as_str(), key.as_str(), outcome);

        match &result {
            Ok(_) if outcome == "stale" => {
                track_stale_response(key.as_str());
                debug!(operation = operation.as_str(), seq, "Discarded stale response");
            }
            Ok(_) => debug!(operation = operation.as_str(), seq, "Store operation succeeded"),
            Err(StoreError::AuthExpired { login_route }) => self.expire_session(login_route),
            Err(e) => error!(
                operation = operation.as_str(),
                seq,
                stale = outcome == "stale",
                error = %e,
                "Store operation failed"
            ),
        }

        result
    }

    fn expire_session(&self, login_route: &str) {
        track_auth_expired();
        self.inner.session.clear();
        warn!(login_route = %login_route, "Session expired");

        let hook = lock(&self.inner.auth_hook).clone();
        if let Some(hook) = hook {
            hook(login_route);
        }
    }

    fn publish(&self, state: &mut StoreState) {
        state.revision += 1;
        self.inner.status.send_replace(state.status());
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        lock(&self.inner.state)
    }
}

/// An issued operation. Dropping it unsettled (the caller's future was
/// cancelled) still takes it off the in-flight count.
struct InFlight<'a, B: ResourceBackend> {
    store: &'a ResourceStore<B>,
    operation: Operation,
    seq: Option<u64>,
    settled: bool,
}

impl<B: ResourceBackend> Drop for InFlight<'_, B> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        let mut state = self.store.lock_state();
        state.in_flight = state.in_flight.saturating_sub(1);
        self.store.publish(&mut state);
        drop(state);

        debug!(
            operation = self.operation.as_str(),
            seq = self.seq,
            "Store operation cancelled before settling"
        );
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
