//! REST backend configuration.
//!
//! # Environment Variables
//!
//! - `API_BASE_URL`: Backend origin (default: `http://localhost:3000`)
//! - `API_PREFIX`: Path prefix for resource routes (default: `/api`)
//! - `API_TIMEOUT_SECONDS`: Per-request timeout. Unset, empty or `0` means no
//!   client-side timeout; the transport's own behavior applies.

use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_PREFIX: &str = "/api";

/// Configuration for the HTTP store backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Backend origin without a trailing slash.
    pub base_url: String,

    /// Path prefix under which every resource lives.
    pub prefix: String,

    /// Optional per-request timeout.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            timeout: None,
        }
    }
}

impl ApiConfig {
    /// Creates an `ApiConfig` pointing at a specific origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            ..Self::default()
        }
    }

    /// Creates a new `ApiConfig` from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .map(|v| normalize_base_url(&v))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let prefix = lookup("API_PREFIX")
            .map(|v| normalize_prefix(&v))
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());

        let timeout = lookup("API_TIMEOUT_SECONDS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            base_url,
            prefix,
            timeout,
        }
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base URL every resource path is appended to.
    pub fn api_root(&self) -> String {
        format!("{}{}", self.base_url, self.prefix)
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
