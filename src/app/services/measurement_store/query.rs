//! Measurement lookup and range reads
//!
//! Lookups are driven by a [`TimestampQuery`] that was resolved once at the
//! boundary: an exact instant selects at most one record, a prefix selects
//! every record whose canonical key starts with it.

use super::MeasurementStore;
use crate::app::models::{Measurement, MetricValues, TimestampKey, TimestampQuery};
use std::ops::Bound;

impl MeasurementStore {
    /// Get the metric values stored at an exact timestamp
    pub fn get(&self, timestamp: &TimestampKey) -> Option<&MetricValues> {
        self.records.get(timestamp)
    }

    /// Look up measurements by exact instant or timestamp prefix
    ///
    /// Results are in ascending timestamp order. An empty vector means nothing
    /// matched; it is not an error.
    ///
    /// # Examples
    /// ```
    /// # use weather_tracker::{MeasurementStore, MetricInput, TimestampKey, TimestampQuery};
    /// let mut store = MeasurementStore::new();
    /// let key = TimestampKey::parse("2015-09-01T16:00:00.000Z").unwrap();
    /// store.insert(key, MetricInput::empty().with_temperature(27.1));
    ///
    /// let day = TimestampQuery::parse("2015-09-01").unwrap();
    /// assert_eq!(store.lookup(&day).len(), 1);
    /// ```
    pub fn lookup(&self, query: &TimestampQuery) -> Vec<Measurement> {
        match query {
            TimestampQuery::Exact(key) => self
                .records
                .get(key)
                .map(|values| vec![Measurement::new(key.clone(), *values)])
                .unwrap_or_default(),
            TimestampQuery::Prefix(prefix) => self
                .records
                .range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
                .take_while(|(key, _)| key.starts_with(prefix))
                .map(|(key, values)| Measurement::new(key.clone(), *values))
                .collect(),
        }
    }

    /// Read every measurement within the inclusive range `[from, to]`
    ///
    /// Returns an empty vector when `from > to`.
    pub fn range(&self, from: &TimestampKey, to: &TimestampKey) -> Vec<Measurement> {
        if from > to {
            return Vec::new();
        }

        self.records
            .range(from.clone()..=to.clone())
            .map(|(key, values)| Measurement::new(key.clone(), *values))
            .collect()
    }

    /// Get all stored measurements in ascending timestamp order
    pub fn measurements(&self) -> Vec<Measurement> {
        self.records
            .iter()
            .map(|(key, values)| Measurement::new(key.clone(), *values))
            .collect()
    }
}
