//! Test support: a backend whose replies are scripted by the test.
//!
//! Each backend call is identified by a tag:
//!
//! | Call | Tag |
//! |------|-----|
//! | `fetch_all` | `fetch:<key>` or `fetch:<key>:<parent>` |
//! | `create` | `create:<key>` |
//! | `update` | `update:<key>:<id>` |
//! | `delete` | `delete:<key>:<id>` |
//! | `perform` | `perform:<key>:<action>` |
//!
//! [`ScriptedBackend::expect`] hands back a sender the test resolves whenever
//! it chooses, which makes completion order fully controllable.
//! [`ScriptedBackend::respond`] scripts an immediate reply.

use async_trait::async_trait;
use chalkportal_core::{FetchParams, StoreError, StoreResult};
use chalkportal_models::Entity;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::oneshot;

use crate::backend::ResourceBackend;
use crate::keys::ResourceKey;

pub type Reply = StoreResult<Value>;

#[derive(Default)]
pub struct ScriptedBackend {
    pending: Mutex<HashMap<String, VecDeque<oneshot::Receiver<Reply>>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next call with `tag`; the reply is sent by the caller.
    pub fn expect(&self, tag: impl Into<String>) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        lock(&self.pending)
            .entry(tag.into())
            .or_default()
            .push_back(rx);
        tx
    }

    /// Scripts the next call with `tag` to resolve immediately.
    pub fn respond(&self, tag: impl Into<String>, reply: Reply) {
        let _ = self.expect(tag).send(reply);
    }

    /// Tags and payloads of every call made so far, in call order.
    pub fn calls(&self) -> Vec<(String, Value)> {
        lock(&self.calls).clone()
    }

    async fn reply<T: DeserializeOwned>(&self, tag: String, payload: Value) -> StoreResult<T> {
        lock(&self.calls).push((tag.clone(), payload));

        let rx = lock(&self.pending)
            .get_mut(&tag)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| StoreError::transport(format!("Unscripted call: {tag}")))?;

        let value = rx
            .await
            .map_err(|_| StoreError::transport(format!("Reply for {tag} was dropped")))??;
        Ok(serde_json::from_value(value)?)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn to_value<P: Serialize>(payload: &P) -> StoreResult<Value> {
    Ok(serde_json::to_value(payload)?)
}

#[async_trait]
impl ResourceBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_all<T: Entity>(
        &self,
        key: &ResourceKey,
        params: &FetchParams,
    ) -> StoreResult<Vec<T>> {
        let tag = match params.path_suffix() {
            Some(parent) => format!("fetch:{key}:{parent}"),
            None => format!("fetch:{key}"),
        };
        self.reply(tag, to_value(params)?).await
    }

    async fn create<T, P>(&self, key: &ResourceKey, payload: &P) -> StoreResult<T>
    where
        T: Entity,
        P: Serialize + Sync,
    {
        self.reply(format!("create:{key}"), to_value(payload)?).await
    }

    async fn update<T, P>(&self, key: &ResourceKey, id: &str, payload: &P) -> StoreResult<T>
    where
        T: Entity,
        P: Serialize + Sync,
    {
        self.reply(format!("update:{key}:{id}"), to_value(payload)?)
            .await
    }

    async fn delete(&self, key: &ResourceKey, id: &str) -> StoreResult<()> {
        self.reply(format!("delete:{key}:{id}"), Value::Null).await
    }

    async fn perform<P, R>(&self, key: &ResourceKey, action: &str, payload: &P) -> StoreResult<R>
    where
        P: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        self.reply(format!("perform:{key}:{action}"), to_value(payload)?)
            .await
    }
}
