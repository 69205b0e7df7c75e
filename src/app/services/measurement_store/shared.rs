//! Lock-guarded measurement store shared between concurrent callers
//!
//! Mutations take the write lock, so the three metric fields of a record are
//! always updated together. Lookups and statistics take the read lock and run
//! in parallel with each other, never observing a partially updated record.

use super::MeasurementStore;
use crate::app::models::{
    Measurement, MetricInput, MetricValues, MutationStatus, StatResult, StatsQuery, TimestampKey,
    TimestampQuery,
};
use crate::app::services::statistics::compute_statistics;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cloneable handle to a single shared [`MeasurementStore`]
#[derive(Debug, Clone, Default)]
pub struct SharedMeasurementStore {
    inner: Arc<RwLock<MeasurementStore>>,
}

impl SharedMeasurementStore {
    /// Create a handle to a new empty store
    pub fn new() -> Self {
        Self::from_store(MeasurementStore::new())
    }

    /// Wrap an existing store
    pub fn from_store(store: MeasurementStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn insert(&self, timestamp: TimestampKey, input: MetricInput) {
        self.inner.write().await.insert(timestamp, input);
    }

    pub async fn lookup(&self, query: &TimestampQuery) -> Vec<Measurement> {
        self.inner.read().await.lookup(query)
    }

    pub async fn replace(&self, timestamp: &TimestampKey, values: MetricValues) -> MutationStatus {
        self.inner.write().await.replace(timestamp, values)
    }

    pub async fn patch(&self, timestamp: &TimestampKey, input: MetricInput) -> MutationStatus {
        self.inner.write().await.patch(timestamp, input)
    }

    pub async fn delete(&self, timestamp: &TimestampKey) -> Option<MetricValues> {
        self.inner.write().await.delete(timestamp)
    }

    /// Compute statistics under a single read lock
    pub async fn statistics(&self, query: &StatsQuery) -> Vec<StatResult> {
        let store = self.inner.read().await;
        let records = store.range(query.from_timestamp(), query.to_timestamp());
        compute_statistics(&records, query)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Copy of the current store contents
    pub async fn snapshot(&self) -> MeasurementStore {
        self.inner.read().await.clone()
    }
}
