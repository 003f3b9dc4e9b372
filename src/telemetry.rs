//! Logging setup for the service binary.
//!
//! Installs a `tracing-subscriber` formatter. `RUST_LOG` takes precedence
//! over the level passed on the command line.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The log level or filter directive could not be parsed.
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter {
        /// The rejected directive.
        value: String,
        /// The underlying parse error.
        #[source]
        source: ParseError,
    },

    /// A global subscriber was already installed.
    #[error("telemetry error: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

/// Builds the filter from `RUST_LOG`, falling back to `log_level`.
pub fn env_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(log_level).map_err(|source| TelemetryError::EnvFilter {
            value: log_level.to_string(),
            source,
        }),
    }
}

/// Installs the global subscriber.
pub fn init(log_level: &str) -> Result<(), TelemetryError> {
    let filter = env_filter(log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}
