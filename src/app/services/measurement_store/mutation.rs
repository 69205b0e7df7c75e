//! Measurement mutations: insert, replace, patch and delete
//!
//! Every mutator works on a single exact timestamp. Replace and patch only
//! touch records that already exist; insert always succeeds and overwrites.

use super::MeasurementStore;
use crate::app::models::{MetricInput, MetricValues, MutationStatus, TimestampKey};
use tracing::debug;

impl MeasurementStore {
    /// Insert or overwrite the measurement at `timestamp`
    ///
    /// Metrics absent from `input` are recorded as `0.0`.
    pub fn insert(&mut self, timestamp: TimestampKey, input: MetricInput) {
        let values = input.or_default_values();
        debug!("Inserting measurement at {}: {:?}", timestamp, values);

        if self.records.insert(timestamp, values).is_some() {
            debug!("Overwrote an existing measurement");
        }
    }

    /// Overwrite all three metrics of an existing measurement
    pub fn replace(&mut self, timestamp: &TimestampKey, values: MetricValues) -> MutationStatus {
        match self.records.get_mut(timestamp) {
            Some(stored) => {
                debug!("Replacing measurement at {}: {:?}", timestamp, values);
                *stored = values;
                MutationStatus::Updated
            }
            None => {
                debug!("Replace target {} not found", timestamp);
                MutationStatus::NotFound
            }
        }
    }

    /// Overwrite only the metrics supplied in `input`, leaving the rest untouched
    pub fn patch(&mut self, timestamp: &TimestampKey, input: MetricInput) -> MutationStatus {
        match self.records.get_mut(timestamp) {
            Some(stored) => {
                input.apply_to(stored);
                debug!("Patched measurement at {}: now {:?}", timestamp, stored);
                MutationStatus::Updated
            }
            None => {
                debug!("Patch target {} not found", timestamp);
                MutationStatus::NotFound
            }
        }
    }

    /// Remove the measurement at `timestamp`, returning its prior values
    pub fn delete(&mut self, timestamp: &TimestampKey) -> Option<MetricValues> {
        let removed = self.records.remove(timestamp);
        debug!(
            "Delete at {}: {}",
            timestamp,
            if removed.is_some() { "removed" } else { "not found" }
        );
        removed
    }

    /// Remove every stored measurement
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
