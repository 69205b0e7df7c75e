//! Statistics engine for stored measurements
//!
//! This module computes per-metric aggregates over the measurements that fall
//! inside a query's inclusive time window.
//!
//! # Result Ordering
//!
//! Results form the cross product of the requested metrics and statistics,
//! metric-major, each in the order given by the query. Requesting
//! `[temperature, dewPoint] x [min, max]` yields temperature/min,
//! temperature/max, dewPoint/min, dewPoint/max.
//!
//! # Empty Windows
//!
//! A (metric, stat) pair with no data behind it is omitted from the output, so
//! a window that contains no measurements produces an empty result list. The
//! engine never fails: query validation happens when the [`StatsQuery`] is built.
//!
//! # Example Usage
//!
//! ```rust
//! use weather_tracker::{
//!     compute_statistics, Measurement, Metric, MetricValues, StatResult, Statistic, StatsQuery,
//!     TimestampKey,
//! };
//!
//! # fn example() -> weather_tracker::Result<()> {
//! let records = vec![
//!     Measurement::new(
//!         TimestampKey::parse("2015-09-01T16:00:00.000Z")?,
//!         MetricValues::new(27.1, 16.7, 0.0),
//!     ),
//!     Measurement::new(
//!         TimestampKey::parse("2015-09-01T16:10:00.000Z")?,
//!         MetricValues::new(27.5, 17.1, 0.0),
//!     ),
//! ];
//!
//! let query = StatsQuery::new(
//!     vec![Metric::Temperature],
//!     vec![Statistic::Min, Statistic::Max],
//!     TimestampKey::parse("2015-09-01T16:00:00.000Z")?,
//!     TimestampKey::parse("2015-09-01T17:00:00.000Z")?,
//! )?;
//!
//! let results = compute_statistics(&records, &query);
//! assert_eq!(results[0], StatResult::new(Metric::Temperature, Statistic::Min, 27.1));
//! assert_eq!(results[1], StatResult::new(Metric::Temperature, Statistic::Max, 27.5));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::app::models::{Measurement, StatResult, StatsQuery};
use tracing::debug;

pub mod aggregate;

#[cfg(test)]
pub mod tests;

pub use aggregate::MetricSummary;

/// Compute the requested statistics over the records inside the query window
///
/// Records outside `[from, to]` are ignored, so callers may pass either a
/// pre-filtered range read or the whole store contents.
pub fn compute_statistics(records: &[Measurement], query: &StatsQuery) -> Vec<StatResult> {
    let selected: Vec<&Measurement> = records
        .iter()
        .filter(|record| query.contains(&record.timestamp))
        .collect();

    debug!(
        "Computing {} statistics over {} of {} records in [{}, {}]",
        query.metrics().len() * query.stats().len(),
        selected.len(),
        records.len(),
        query.from_timestamp(),
        query.to_timestamp()
    );

    let mut results = Vec::with_capacity(query.metrics().len() * query.stats().len());

    for &metric in query.metrics() {
        let summary =
            MetricSummary::from_values(selected.iter().map(|record| record.value(metric)));

        for &stat in query.stats() {
            match summary.value(stat) {
                Some(value) => results.push(StatResult::new(metric, stat, value)),
                None => debug!("No data for {} {}, omitting", metric, stat),
            }
        }
    }

    results
}
