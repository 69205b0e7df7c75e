//! Weather Tracker Library
//!
//! An in-memory repository for timestamped weather measurements (temperature,
//! dew point and precipitation) with a statistics engine on top.
//!
//! This library provides tools for:
//! - Storing one measurement per canonical UTC instant
//! - Exact-instant and date-prefix lookups over the stored timestamps
//! - Full replacement and partial (patch) updates of stored measurements
//! - Min/max/average statistics over an inclusive time window
//! - A request-level service and a script driver for exercising the store

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod measurement_service;
        pub mod measurement_store;
        pub mod statistics;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod script;
}

// Re-export commonly used types
pub use app::models::{
    Measurement, Metric, MetricInput, MetricValues, MutationStatus, StatResult, Statistic,
    StatsQuery, TimestampKey, TimestampQuery,
};
pub use app::services::measurement_store::{MeasurementStore, SharedMeasurementStore};
pub use app::services::statistics::compute_statistics;
pub use config::Config;

/// Result type alias for the weather tracker
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for weather tracker operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Request rejected before reaching the store
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Timestamp or timestamp prefix could not be interpreted
    #[error("Invalid timestamp '{value}': {message}")]
    InvalidTimestamp { value: String, message: String },

    /// Unknown metric name
    #[error("Unknown metric: {name}")]
    UnknownMetric { name: String },

    /// Unknown statistic name
    #[error("Unknown statistic: {name}")]
    UnknownStatistic { name: String },

    /// Script line could not be parsed
    #[error("Script error on line {line}: {message}")]
    Script { line: usize, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Output serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an invalid timestamp error
    pub fn invalid_timestamp(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create an unknown metric error
    pub fn unknown_metric(name: impl Into<String>) -> Self {
        Self::UnknownMetric { name: name.into() }
    }

    /// Create an unknown statistic error
    pub fn unknown_statistic(name: impl Into<String>) -> Self {
        Self::UnknownStatistic { name: name.into() }
    }

    /// Create a script error for a given (1-based) line
    pub fn script(line: usize, message: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<::config::ConfigError> for Error {
    fn from(error: ::config::ConfigError) -> Self {
        Self::Configuration {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let error = Error::io(
            "Failed to read script scenario.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(
            error.to_string(),
            "I/O error: Failed to read script scenario.txt"
        );
        assert!(std::error::Error::source(&error).is_some());

        let error = Error::processing_interrupted("Interrupted by user");
        assert_eq!(
            error.to_string(),
            "Processing interrupted: Interrupted by user"
        );

        let error = Error::script(4, "unknown command 'fetch'");
        assert_eq!(
            error.to_string(),
            "Script error on line 4: unknown command 'fetch'"
        );
    }

    #[test]
    fn test_foreign_error_conversions() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(
            Error::from(json_error),
            Error::Serialization { .. }
        ));

        let config_error = ::config::ConfigError::Message("bad value".to_string());
        assert!(matches!(
            Error::from(config_error),
            Error::Configuration { .. }
        ));
    }
}
