//! Data models for weather measurement tracking
//!
//! This module contains the core data structures for representing stored
//! measurements, partial metric input, statistics queries and their results.

use crate::constants::{self, metric_names, statistic_names};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub mod timestamp;

pub use timestamp::{TimestampKey, TimestampQuery};

// =============================================================================
// Metric and Statistic Enumerations
// =============================================================================

/// Weather metrics tracked for every measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// Air temperature
    Temperature,
    /// Dew point temperature
    DewPoint,
    /// Precipitation amount
    Precipitation,
}

impl Metric {
    /// Wire name of this metric (e.g. `dewPoint`)
    pub fn name(self) -> &'static str {
        match self {
            Metric::Temperature => metric_names::TEMPERATURE,
            Metric::DewPoint => metric_names::DEW_POINT,
            Metric::Precipitation => metric_names::PRECIPITATION,
        }
    }

    /// All metrics in storage order
    pub fn all_values() -> [Metric; 3] {
        [Metric::Temperature, Metric::DewPoint, Metric::Precipitation]
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            metric_names::TEMPERATURE => Ok(Metric::Temperature),
            metric_names::DEW_POINT => Ok(Metric::DewPoint),
            metric_names::PRECIPITATION => Ok(Metric::Precipitation),
            other => Err(Error::unknown_metric(other)),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Aggregate statistics the engine can compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    Min,
    Max,
    #[serde(alias = "avg")]
    Average,
}

impl Statistic {
    /// Wire name of this statistic
    pub fn name(self) -> &'static str {
        match self {
            Statistic::Min => statistic_names::MIN,
            Statistic::Max => statistic_names::MAX,
            Statistic::Average => statistic_names::AVERAGE,
        }
    }
}

impl FromStr for Statistic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            statistic_names::MIN => Ok(Statistic::Min),
            statistic_names::MAX => Ok(Statistic::Max),
            statistic_names::AVERAGE | statistic_names::AVERAGE_ALIAS => Ok(Statistic::Average),
            other => Err(Error::unknown_statistic(other)),
        }
    }
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Metric Values
// =============================================================================

/// The three metric values held by a stored measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricValues {
    pub temperature: f64,
    pub dew_point: f64,
    pub precipitation: f64,
}

impl MetricValues {
    pub fn new(temperature: f64, dew_point: f64, precipitation: f64) -> Self {
        Self {
            temperature,
            dew_point,
            precipitation,
        }
    }

    /// Get the value of a single metric
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::DewPoint => self.dew_point,
            Metric::Precipitation => self.precipitation,
        }
    }

    /// Overwrite the value of a single metric
    pub fn set(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::Temperature => self.temperature = value,
            Metric::DewPoint => self.dew_point = value,
            Metric::Precipitation => self.precipitation = value,
        }
    }
}

/// Metric values as supplied by a caller, where any field may be absent
///
/// Absent fields are `None` rather than a reserved float, so every real
/// reading remains representable. Create paths default absent fields to
/// [`constants::DEFAULT_METRIC_VALUE`]; patch paths leave them untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dew_point: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
}

impl MetricInput {
    /// Input with every field absent
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, value: f64) -> Self {
        self.temperature = Some(value);
        self
    }

    pub fn with_dew_point(mut self, value: f64) -> Self {
        self.dew_point = Some(value);
        self
    }

    pub fn with_precipitation(mut self, value: f64) -> Self {
        self.precipitation = Some(value);
        self
    }

    /// Get the supplied value of a single metric, if any
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::DewPoint => self.dew_point,
            Metric::Precipitation => self.precipitation,
        }
    }

    /// Set a single metric
    pub fn set(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::Temperature => self.temperature = Some(value),
            Metric::DewPoint => self.dew_point = Some(value),
            Metric::Precipitation => self.precipitation = Some(value),
        }
    }

    /// Resolve into concrete values, defaulting absent fields for creation
    pub fn or_default_values(&self) -> MetricValues {
        MetricValues::new(
            self.temperature.unwrap_or(constants::DEFAULT_METRIC_VALUE),
            self.dew_point.unwrap_or(constants::DEFAULT_METRIC_VALUE),
            self.precipitation.unwrap_or(constants::DEFAULT_METRIC_VALUE),
        )
    }

    /// Concrete values if all three fields were supplied
    pub fn complete(&self) -> Option<MetricValues> {
        Some(MetricValues::new(
            self.temperature?,
            self.dew_point?,
            self.precipitation?,
        ))
    }

    /// Metrics missing from this input, in storage order
    pub fn missing_metrics(&self) -> Vec<Metric> {
        Metric::all_values()
            .into_iter()
            .filter(|metric| self.get(*metric).is_none())
            .collect()
    }

    /// Overwrite only the supplied fields of `values`
    pub fn apply_to(&self, values: &mut MetricValues) {
        for metric in Metric::all_values() {
            if let Some(value) = self.get(metric) {
                values.set(metric, value);
            }
        }
    }
}

impl From<MetricValues> for MetricInput {
    fn from(values: MetricValues) -> Self {
        Self {
            temperature: Some(values.temperature),
            dew_point: Some(values.dew_point),
            precipitation: Some(values.precipitation),
        }
    }
}

// =============================================================================
// Measurement Record
// =============================================================================

/// A stored measurement: a canonical timestamp and its metric values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub timestamp: TimestampKey,
    #[serde(flatten)]
    pub values: MetricValues,
}

impl Measurement {
    pub fn new(timestamp: TimestampKey, values: MetricValues) -> Self {
        Self { timestamp, values }
    }

    /// Get the value of a single metric
    pub fn value(&self, metric: Metric) -> f64 {
        self.values.get(metric)
    }
}

/// Result of a store mutation that targets an existing record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationStatus {
    /// The record existed and was updated
    Updated,
    /// The request's embedded timestamp disagreed with the target key.
    /// Never produced by the store itself; reserved for callers that check keys.
    Conflict,
    /// No record exists at the target key
    NotFound,
}

impl MutationStatus {
    pub fn is_updated(self) -> bool {
        self == MutationStatus::Updated
    }
}

// =============================================================================
// Statistics Query and Result
// =============================================================================

/// A validated statistics query
///
/// Metrics and statistics keep the order in which they were requested, which
/// determines the order of the computed results.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsQuery {
    metrics: Vec<Metric>,
    stats: Vec<Statistic>,
    from: TimestampKey,
    to: TimestampKey,
}

impl StatsQuery {
    /// Create a query, rejecting empty metric/stat lists and inverted ranges
    pub fn new(
        metrics: Vec<Metric>,
        stats: Vec<Statistic>,
        from: TimestampKey,
        to: TimestampKey,
    ) -> Result<Self> {
        if metrics.is_empty() {
            return Err(Error::invalid_input(
                "Statistics query requires at least one metric",
            ));
        }

        if stats.is_empty() {
            return Err(Error::invalid_input(
                "Statistics query requires at least one statistic",
            ));
        }

        if from > to {
            return Err(Error::invalid_input(format!(
                "Statistics range start {} is after range end {}",
                from, to
            )));
        }

        Ok(Self {
            metrics,
            stats,
            from,
            to,
        })
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn stats(&self) -> &[Statistic] {
        &self.stats
    }

    /// Inclusive start of the query window
    pub fn from_timestamp(&self) -> &TimestampKey {
        &self.from
    }

    /// Inclusive end of the query window
    pub fn to_timestamp(&self) -> &TimestampKey {
        &self.to
    }

    /// Whether a timestamp lies within the inclusive query window
    pub fn contains(&self, timestamp: &TimestampKey) -> bool {
        &self.from <= timestamp && timestamp <= &self.to
    }
}

/// One computed statistic for one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatResult {
    pub metric: Metric,
    pub stat: Statistic,
    pub value: f64,
}

impl StatResult {
    pub fn new(metric: Metric, stat: Statistic, value: f64) -> Self {
        Self {
            metric,
            stat,
            value,
        }
    }
}
