//! Application constants for the weather tracker
//!
//! This module contains the canonical timestamp format, metric and statistic
//! names, default values and environment names used throughout the crate.

// =============================================================================
// Timestamp Format
// =============================================================================

/// chrono format string producing the canonical instant form
/// (e.g. `2015-09-01T16:00:00.000Z`)
pub const CANONICAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Length of a canonical timestamp string
pub const CANONICAL_TIMESTAMP_LEN: usize = 24;

/// Shape of the canonical form, used to validate prefix lookups position by position.
/// `9` stands for any ASCII digit, every other byte must match literally.
pub const CANONICAL_TIMESTAMP_SHAPE: &str = "9999-99-99T99:99:99.999Z";

// =============================================================================
// Metric and Statistic Names
// =============================================================================

/// Wire names of the tracked metrics, in storage order
pub mod metric_names {
    pub const TEMPERATURE: &str = "temperature";
    pub const DEW_POINT: &str = "dewPoint";
    pub const PRECIPITATION: &str = "precipitation";
}

/// Wire names of the supported statistics
pub mod statistic_names {
    pub const MIN: &str = "min";
    pub const MAX: &str = "max";
    pub const AVERAGE: &str = "average";

    /// Short alias accepted for `average`
    pub const AVERAGE_ALIAS: &str = "avg";
}

// =============================================================================
// Store Defaults
// =============================================================================

/// Value recorded for a metric omitted on create
pub const DEFAULT_METRIC_VALUE: f64 = 0.0;

// =============================================================================
// Configuration and Logging
// =============================================================================

/// Application name used for the config directory
pub const APP_NAME: &str = "weather-tracker";

/// Default config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Prefix for environment variable overrides (`WEATHER_TRACKER__LOGGING__LEVEL`)
pub const ENV_PREFIX: &str = "WEATHER_TRACKER";

/// Separator between nested keys in environment variable overrides
pub const ENV_SEPARATOR: &str = "__";

/// Tracing target used by the default log filter
pub const LOG_TARGET: &str = "weather_tracker";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted by the configuration
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Script Language
// =============================================================================

/// Marker that starts a comment in measurement scripts
pub const SCRIPT_COMMENT_MARKER: char = '#';
