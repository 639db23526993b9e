use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Build the log filter: `RUST_LOG` wins, otherwise `log_level` for this crate
/// and `warn` for the HTTP stack.
pub fn build_env_filter(service_name: &str, log_level: &str) -> Result<EnvFilter, ObservabilityError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(format!(
        "{}={},reqwest=warn,hyper=warn",
        service_name.replace('-', "_"),
        log_level
    ))
    .map_err(|e| ObservabilityError::Config(format!("invalid log level '{}': {}", log_level, e)))
}

/// Initialize structured logging to stderr, human-readable or JSON
pub fn init_observability(
    service_name: &str,
    log_level: &str,
    enable_json_logging: bool,
) -> Result<(), ObservabilityError> {
    let env_filter = build_env_filter(service_name, log_level)?;

    let result = if enable_json_logging {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(false)
            .with_span_list(false)
            .with_target(false)
            .with_level(true)
            .with_file(false)
            .with_line_number(false)
            .with_span_events(FmtSpan::NONE);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .with_span_events(FmtSpan::NONE);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    };

    result.map_err(|e| ObservabilityError::TracingInit(e.to_string()))?;

    info!("Observability initialized for {}", service_name);
    debug!(json = enable_json_logging, "Log format selected");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_env_filter_rejects_garbage_level() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let result = build_env_filter("rocketshoes-cart", "loud");
        assert!(matches!(result, Err(ObservabilityError::Config(_))));
    }

    #[test]
    fn test_build_env_filter_accepts_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(build_env_filter("rocketshoes-cart", level).is_ok());
        }
    }

    #[test]
    fn test_second_init_reports_error() {
        let _ = init_observability("rocketshoes-cart-test", "info", false);
        let second = init_observability("rocketshoes-cart-test", "info", true);
        assert!(matches!(second, Err(ObservabilityError::TracingInit(_))));
    }
}
