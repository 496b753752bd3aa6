use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose logs are kept at `warn` unless `RUST_LOG` says otherwise.
pub(crate) const QUIET_DEPENDENCIES: &str = "reqwest=warn,hyper=warn,hyper_util=warn,rustls=warn";

/// Initialize basic console logging.
///
/// This provides a minimal but functional logging setup that enables console output
/// for all tracing macros (info!, warn!, error!, debug!, etc.) throughout the client.
///
/// # Configuration
///
/// - **Log Level**: Controlled by `LOG_LEVEL` environment variable (default: "info")
/// - **Filtering**: `RUST_LOG` takes precedence; noisy HTTP dependencies are kept at warn
/// - **Format**: Compact format with ANSI colors, written to stderr so command output stays clean
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_basic_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&log_level)));

    let console_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(true)
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}

pub(crate) fn default_directives(log_level: &str) -> String {
    format!("{log_level},{QUIET_DEPENDENCIES}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        let directives = default_directives("debug");
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("reqwest=warn"));
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
