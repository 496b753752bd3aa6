//! Client-side metrics.
//!
//! Recorded through the `metrics` facade; the embedding application decides
//! whether and where to export them by installing a recorder.

use metrics::{counter, histogram};
use std::time::Duration;

use crate::logging::is_observability_enabled;

/// Track one backend HTTP request
pub fn track_request(method: &str, resource: &str, status: u16, latency: Duration) {
    if !is_observability_enabled() {
        return;
    }

    let status_category = match status {
        200..=299 => "2xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        0 => "transport",
        _ => "other",
    };

    histogram!(
        "portal_request_duration_seconds",
        "method" => method.to_string(),
        "resource" => resource.to_string(),
        "status_category" => status_category
    )
    .record(latency.as_secs_f64());
}

/// Track a settled store operation.
///
/// `outcome` is `success`, `stale`, `error` or `auth_expired`.
pub fn track_store_operation(operation: &str, resource: &str, outcome: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!(
        "portal_store_operations_total",
        "operation" => operation.to_string(),
        "resource" => resource.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    if outcome == "error" {
        counter!(
            "portal_store_failures_total",
            "operation" => operation.to_string(),
            "resource" => resource.to_string()
        )
        .increment(1);
    }
}

/// Track a fetch response discarded because a newer request superseded it
pub fn track_stale_response(resource: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("portal_stale_responses_total", "resource" => resource.to_string()).increment(1);
}

pub fn track_auth_expired() {
    if !is_observability_enabled() {
        return;
    }
    counter!("portal_auth_expired_total").increment(1);
}
