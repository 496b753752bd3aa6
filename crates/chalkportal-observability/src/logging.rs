use std::sync::OnceLock;
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::basic_logging::default_directives;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| parse_enabled(std::env::var("OBSERVABILITY_ENABLED").ok()))
}

fn parse_enabled(value: Option<String>) -> bool {
    value
        .map(|v| v.to_lowercase() != "false" && v != "0")
        .unwrap_or(true) // Enabled by default
}

/// Initialize logging for the portal client.
///
/// Console output always goes to stderr. When `LOG_DIR` is set and
/// observability is enabled, two daily-rotated files are added under it:
/// `chalkportal.log` (errors only) and `chalkportal.json` (structured, info and up).
///
/// Falls back to console-only logging if the log directory cannot be created.
pub fn init_tracing() {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};

    let log_dir = std::env::var("LOG_DIR")
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .filter(|_| is_observability_enabled());

    let Some(log_dir) = log_dir else {
        crate::init_basic_console_logging();
        return;
    };

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        crate::init_basic_console_logging();
        tracing::warn!(error = %e, log_dir = %log_dir, "Failed to create logs directory, logging to console only");
        return;
    }

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    // Console layer with filtering
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&log_level)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    // File layer for errors
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "chalkportal.log");

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    // JSON file layer for structured logs
    let json_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "chalkportal.json");

    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new(default_directives("info")));

    let initialized = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()
        .is_ok();

    if initialized {
        info!(log_dir = %log_dir, "File logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_by_default() {
        assert!(parse_enabled(None));
        assert!(parse_enabled(Some("true".to_string())));
    }

    #[test]
    fn test_disabled_values() {
        assert!(!parse_enabled(Some("false".to_string())));
        assert!(!parse_enabled(Some("FALSE".to_string())));
        assert!(!parse_enabled(Some("0".to_string())));
    }
}
