//! Structured logging configuration.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

use crate::TelemetryConfig;

/// Directives appended to every filter. HTTP request spans are noisy at
/// `debug`, so they stay at `info` unless `RUST_LOG` asks otherwise.
const BASE_DIRECTIVES: &[&str] = &["tower_http=info", "hyper=warn"];

/// Builds the filter: `RUST_LOG` if set, otherwise the configured level.
#[must_use]
pub fn build_filter(config: &TelemetryConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let mut directives = config.log_level.clone();
    for directive in BASE_DIRECTIVES {
        let target = directive.split('=').next().unwrap_or_default();
        if !config.log_level.contains(target) {
            directives.push(',');
            directives.push_str(directive);
        }
    }
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn try_init_logging(config: &TelemetryConfig) -> Result<(), TryInitError> {
    let filter = build_filter(config);

    if config.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).compact())
            .try_init()?;
    }

    tracing::info!(
        service = %config.service_name,
        level = %config.log_level,
        json = config.json_logs,
        "Logging initialized"
    );
    Ok(())
}

/// Installs the global subscriber, warning on stderr if one already exists.
pub fn init_logging(config: &TelemetryConfig) {
    if let Err(e) = try_init_logging(config) {
        eprintln!("\x1b[33mWarning:\x1b[0m logging already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_appends_base_directives() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let filter = build_filter(&TelemetryConfig::new("roster").with_log_level("debug"));
        let rendered = filter.to_string();
        assert!(rendered.contains("tower_http=info"));
        assert!(rendered.contains("debug"));
    }

    #[test]
    fn test_filter_keeps_explicit_directive() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let filter = build_filter(
            &TelemetryConfig::new("roster").with_log_level("info,tower_http=trace"),
        );
        let rendered = filter.to_string();
        assert!(rendered.contains("tower_http=trace"));
        assert!(!rendered.contains("tower_http=info"));
    }
}
