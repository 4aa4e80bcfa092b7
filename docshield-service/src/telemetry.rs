//! Tracing subscriber initialization.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{ApiError, ApiResult};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "docshield_service=debug,docshield_storage=debug,info";

/// Telemetry configuration from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup event.
    pub service_name: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "docshield".to_string(),
            json: false,
        }
    }
}

impl TelemetryConfig {
    /// Read `DOCSHIELD_SERVICE_NAME` and `DOCSHIELD_LOG_JSON`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            service_name: lookup("DOCSHIELD_SERVICE_NAME").unwrap_or(defaults.service_name),
            json: lookup("DOCSHIELD_LOG_JSON")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(defaults.json),
        }
    }
}

/// Install the global tracing subscriber.
///
/// Call once at startup. A second call returns an error rather than
/// replacing the installed subscriber.
pub fn init_tracing(config: &TelemetryConfig) -> ApiResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };
    result.map_err(|e| {
        ApiError::with_message(
            docshield_core::ErrorKind::Internal,
            format!("Failed to initialize tracing subscriber: {}", e),
        )
    })?;

    tracing::info!(service = %config.service_name, json = config.json, "tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_defaults() {
        let config = TelemetryConfig::from_lookup(|_| None);
        assert_eq!(config, TelemetryConfig::default());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("DOCSHIELD_SERVICE_NAME", "docs-eu"),
            ("DOCSHIELD_LOG_JSON", "1"),
        ]
        .into_iter()
        .collect();
        let config = TelemetryConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.service_name, "docs-eu");
        assert!(config.json);
    }

    #[test]
    fn test_second_init_is_an_error() {
        let config = TelemetryConfig::default();
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }
}
