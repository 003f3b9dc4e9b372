//! Error types for the CRS scoring engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Scoring itself is total: lookup misses and out-of-range profile values
//! are absorbed as zero points or clamped values, so the only error a
//! scoring call can return is a missing configuration. Everything else
//! here belongs to configuration acquisition.

use thiserror::Error;

/// The main error type for the CRS scoring engine.
///
/// # Example
///
/// ```
/// use crs_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration table parsed but violates a structural invariant.
    #[error("Invalid configuration table '{table}': {message}")]
    InvalidConfig {
        /// Dotted path of the offending table (e.g. "core.age").
        table: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// Scoring was requested before any configuration was loaded.
    #[error("No scoring configuration is loaded")]
    ConfigurationMissing,
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidConfig`].
    pub fn invalid_config(table: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidConfig {
            table: table.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
