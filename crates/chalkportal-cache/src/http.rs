//! REST backend.
//!
//! Routes, relative to [`ApiConfig::api_root`]:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `fetch_all` | `GET /api/<key>[/<parent>]?from=..&to=..&<filters>` |
//! | `create` | `POST /api/<key>` |
//! | `update` | `PUT /api/<key>/<id>` |
//! | `delete` | `DELETE /api/<key>/<id>` |
//! | `perform` | `POST /api/<key>/<action>` |
//!
//! Every request carries `Authorization: Bearer <token>` when a session is
//! present, and an `x-request-id` header for correlating logs. Ids, parents
//! and action names are percent-encoded as single path segments.

use async_trait::async_trait;
use chalkportal_auth::SessionContext;
use chalkportal_config::{ApiConfig, LoginRoutes};
use chalkportal_core::{FetchParams, StoreError, StoreResult, extract_error_message};
use chalkportal_models::Entity;
use chalkportal_observability::track_request;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Instant;
use tracing::{Span, debug, error, instrument, warn};
use uuid::Uuid;

use crate::backend::ResourceBackend;
use crate::keys::ResourceKey;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Store backend talking to the portal's REST API.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: ApiConfig,
    api_root: Url,
    session: SessionContext,
    login_routes: LoginRoutes,
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.config.base_url)
            .field("prefix", &self.config.prefix)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

impl HttpBackend {
    /// Creates a backend reading its bearer token from `session`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Transport` if the HTTP client cannot be built or
    /// the configured base URL is not a valid absolute URL.
    pub fn new(
        config: ApiConfig,
        session: SessionContext,
        login_routes: LoginRoutes,
    ) -> StoreResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(StoreError::transport)?;

        let api_root = Url::parse(&config.api_root()).map_err(|e| {
            StoreError::transport(format!("Invalid API base URL '{}': {e}", config.api_root()))
        })?;
        if api_root.cannot_be_a_base() {
            return Err(StoreError::transport(format!(
                "API base URL '{api_root}' cannot hold resource paths"
            )));
        }

        Ok(Self {
            client,
            config,
            api_root,
            session,
            login_routes,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Resource URL with each segment percent-encoded.
    fn resource_url(&self, segments: &[&str]) -> Url {
        let mut url = self.api_root.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Build a request with optional authentication.
    fn build_request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut request = self.client.request(method, url);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Sends a request and returns the response body of a 2xx response.
    #[instrument(
        skip(self, request),
        fields(http.method = %method, resource = %key, request_id = tracing::field::Empty)
    )]
    async fn send(
        &self,
        method: Method,
        key: &ResourceKey,
        request: RequestBuilder,
    ) -> StoreResult<String> {
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());
        let start = Instant::now();

        let response = match request.header(REQUEST_ID_HEADER, &request_id).send().await {
            Ok(response) => response,
            Err(e) => {
                track_request(method.as_str(), key.as_str(), 0, start.elapsed());
                error!(error = %e, "Request failed before a response was received");
                return Err(StoreError::transport(e));
            }
        };

        let status = response.status();
        let body = response.text().await.map_err(StoreError::transport)?;
        let latency = start.elapsed();
        track_request(method.as_str(), key.as_str(), status.as_u16(), latency);

        let latency_ms = latency.as_millis() as u64;
        if status.is_success() {
            debug!(status = status.as_u16(), latency_ms, "Request completed");
            return Ok(body);
        }

        if status == StatusCode::UNAUTHORIZED {
            warn!(latency_ms, "Session token rejected");
            return Err(StoreError::auth_expired(
                self.session.login_route(&self.login_routes),
            ));
        }

        let message = error_message(status, &body);
        if status.is_server_error() {
            error!(status = status.as_u16(), latency_ms, error = %message, "Request failed");
        } else {
            warn!(status = status.as_u16(), latency_ms, error = %message, "Request rejected");
        }

        Err(StoreError::server(status.as_u16(), message))
    }
}

/// Backend-supplied message, or a generic one naming the status code.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| extract_error_message(&value))
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()))
}

/// Decodes a response body. An empty body decodes as JSON `null`.
fn decode<T: DeserializeOwned>(body: &str) -> StoreResult<T> {
    if body.trim().is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_str(body)?)
}

/// Accepts both a bare array and a `{"data": [...]}` envelope.
fn unwrap_collection(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_array) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[async_trait]
impl ResourceBackend for HttpBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_all<T: Entity>(
        &self,
        key: &ResourceKey,
        params: &FetchParams,
    ) -> StoreResult<Vec<T>> {
        let url = match params.path_suffix() {
            Some(parent) => self.resource_url(&[key.as_str(), parent]),
            None => self.resource_url(&[key.as_str()]),
        };

        let request = self
            .build_request(Method::GET, url)
            .query(&params.query_pairs());
        let body = self.send(Method::GET, key, request).await?;

        let value: Value = decode(&body)?;
        Ok(serde_json::from_value(unwrap_collection(value))?)
    }

    async fn create<T, P>(&self, key: &ResourceKey, payload: &P) -> StoreResult<T>
    where
        T: Entity,
        P: Serialize + Sync,
    {
        let url = self.resource_url(&[key.as_str()]);
        let request = self.build_request(Method::POST, url).json(payload);
        let body = self.send(Method::POST, key, request).await?;
        decode(&body)
    }

    async fn update<T, P>(&self, key: &ResourceKey, id: &str, payload: &P) -> StoreResult<T>
    where
        T: Entity,
        P: Serialize + Sync,
    {
        let url = self.resource_url(&[key.as_str(), id]);
        let request = self.build_request(Method::PUT, url).json(payload);
        let body = self.send(Method::PUT, key, request).await?;
        decode(&body)
    }

    async fn delete(&self, key: &ResourceKey, id: &str) -> StoreResult<()> {
        let url = self.resource_url(&[key.as_str(), id]);
        let request = self.build_request(Method::DELETE, url);
        self.send(Method::DELETE, key, request).await?;
        Ok(())
    }

    async fn perform<P, R>(&self, key: &ResourceKey, action: &str, payload: &P) -> StoreResult<R>
    where
        P: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let url = self.resource_url(&[key.as_str(), action]);
        let request = self.build_request(Method::POST, url).json(payload);
        let body = self.send(Method::POST, key, request).await?;
        decode(&body)
    }
}
