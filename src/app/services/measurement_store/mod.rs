//! Measurement store service for timestamped weather measurements
//!
//! This module provides the in-memory repository that owns every stored
//! measurement. Records are indexed by their canonical timestamp in a
//! `BTreeMap`, so exact lookups are O(log n) and prefix and range reads walk
//! the keys in chronological order.
//!
//! # Architecture
//!
//! - [`MeasurementStore`] - the owned container with `&mut self` mutators
//! - [`query`] - exact/prefix lookups and inclusive range reads
//! - [`mutation`] - insert, replace, patch and delete
//! - [`shared`] - [`SharedMeasurementStore`], the lock-guarded handle shared
//!   between concurrent callers

use crate::app::models::{MetricValues, TimestampKey};
use std::collections::BTreeMap;

pub mod mutation;
pub mod query;
pub mod shared;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use shared::SharedMeasurementStore;

/// In-memory measurement repository
///
/// At most one record exists per canonical timestamp. The store is created
/// empty and is never evicted from.
#[derive(Debug, Clone, Default)]
pub struct MeasurementStore {
    /// Metric values indexed by canonical timestamp
    pub(crate) records: BTreeMap<TimestampKey, MetricValues>,
}

impl MeasurementStore {
    /// Create a new empty measurement store
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Get the total number of stored measurements
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the store holds no measurements
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check if a measurement exists at an exact timestamp
    pub fn contains(&self, timestamp: &TimestampKey) -> bool {
        self.records.contains_key(timestamp)
    }
}
