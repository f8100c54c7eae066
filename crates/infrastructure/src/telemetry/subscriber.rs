//! Tracing subscriber initialization
//!
//! Installs an `EnvFilter`-driven console subscriber emitting either
//! human-readable or JSON lines.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "debug", "application=debug,tower_http=info")
    ///
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "application=info,domain=info,infrastructure=info,integration_transit=info,presentation_http=info,tower_http=info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}

/// Output format of log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: '{other}' (expected 'text' or 'json')")),
        }
    }
}

/// Build the level filter, preferring `RUST_LOG` over the configured filter
fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .map_err(|e| TelemetryError::Filter(format!("'{}': {e}", config.log_filter))),
    }
}

/// Initialize the global tracing subscriber
///
/// Must be called once at startup before any spans are created.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a global
/// subscriber is already installed.
///
/// # Example
///
/// ```rust,ignore
/// use infrastructure::telemetry::{LogFormat, TelemetryConfig, init_telemetry};
///
/// init_telemetry(&TelemetryConfig::default(), LogFormat::Json)?;
/// ```
pub fn init_telemetry(config: &TelemetryConfig, format: LogFormat) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(true),
            )
            .try_init(),
    }
    .map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(format = %format, "Logging initialized");
    Ok(())
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Invalid filter directive
    #[error("Invalid log filter {0}")]
    Filter(String),

    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TelemetryConfig::default();
        assert!(config.log_filter.contains("application=info"));
        assert!(config.log_filter.contains("tower_http=info"));
    }

    #[test]
    fn test_config_filter_default_when_missing() {
        let parsed: TelemetryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.log_filter, default_log_filter());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("TEXT".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_format_serde() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, LogFormat::Json);
        assert_eq!(serde_json::to_string(&LogFormat::Text).unwrap(), "\"text\"");
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let config = TelemetryConfig {
            log_filter: "application=notalevel".to_string(),
        };
        // RUST_LOG may be set in CI; only check the configured path when it is not
        if std::env::var("RUST_LOG").is_err() {
            assert!(matches!(build_filter(&config), Err(TelemetryError::Filter(_))));
        }
    }
}
