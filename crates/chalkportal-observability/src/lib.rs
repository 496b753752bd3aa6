//! Chalkportal Observability Module
//!
//! Provides configurable observability features including:
//! - Console logging, plus daily-rotated JSON log files when `LOG_DIR` is set
//! - Store and HTTP request metrics via the `metrics` facade
//!
//! This module can be enabled or disabled at compile time via the `observability` feature flag.
//! At runtime, observability can be further controlled via the `OBSERVABILITY_ENABLED` environment variable.
//!
//! # Features
//!
//! - `observability` (default): Enables file logging and metrics. Without it, logging is
//!   console-only and every tracking function is a no-op.
//!
//! # Examples
//!
//! ```no_run
//! use chalkportal_observability::init_tracing;
//!
//! fn main() {
//!     init_tracing();
//!     // ... application code ...
//! }
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

// Public exports when observability is enabled
#[cfg(feature = "observability")]
pub use logging::{init_tracing, is_observability_enabled};
#[cfg(feature = "observability")]
pub use metrics::{
    track_auth_expired, track_request, track_stale_response, track_store_operation,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use std::time::Duration;

    /// No-op observability check when feature disabled
    pub fn is_observability_enabled() -> bool {
        false
    }

    /// Console-only logging when feature disabled
    pub fn init_tracing() {
        super::init_basic_console_logging();
    }

    // No-op tracking functions
    pub fn track_request(_method: &str, _resource: &str, _status: u16, _latency: Duration) {}
    pub fn track_store_operation(_operation: &str, _resource: &str, _outcome: &str) {}
    pub fn track_stale_response(_resource: &str) {}
    pub fn track_auth_expired() {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
