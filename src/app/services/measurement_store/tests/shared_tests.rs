//! Tests for the lock-guarded shared store handle

use super::*;
use crate::app::models::{Metric, MutationStatus, StatResult, Statistic, StatsQuery, TimestampQuery};
use crate::app::services::measurement_store::SharedMeasurementStore;

#[tokio::test]
async fn test_clones_share_the_same_store() {
    let store = SharedMeasurementStore::new();
    let other = store.clone();

    store
        .insert(ts("2015-09-01T16:00:00.000Z"), full_input(27.1, 16.7, 0.0))
        .await;

    assert_eq!(other.len().await, 1);
    let results = other
        .lookup(&TimestampQuery::parse("2015-09-01").unwrap())
        .await;
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_shared_mutations_report_status() {
    let store = SharedMeasurementStore::from_store(create_test_store());
    let key = ts("2015-09-01T16:00:00.000Z");
    let missing = ts("2015-09-01T16:05:00.000Z");

    assert_eq!(
        store.replace(&key, MetricValues::new(1.0, 2.0, 3.0)).await,
        MutationStatus::Updated
    );
    assert_eq!(
        store
            .patch(&missing, MetricInput::empty().with_temperature(1.0))
            .await,
        MutationStatus::NotFound
    );
    assert_eq!(
        store.delete(&key).await,
        Some(MetricValues::new(1.0, 2.0, 3.0))
    );
    assert_eq!(store.delete(&key).await, None);
}

#[tokio::test]
async fn test_shared_statistics_use_range() {
    let store = SharedMeasurementStore::from_store(create_test_store());

    let query = StatsQuery::new(
        vec![Metric::Temperature],
        vec![Statistic::Min, Statistic::Max],
        ts("2015-09-01T16:00:00.000Z"),
        ts("2015-09-01T16:10:00.000Z"),
    )
    .unwrap();

    let results = store.statistics(&query).await;
    assert_eq!(
        results,
        vec![
            StatResult::new(Metric::Temperature, Statistic::Min, 27.1),
            StatResult::new(Metric::Temperature, Statistic::Max, 27.5),
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_patches_are_not_lost() {
    let store = SharedMeasurementStore::new();
    let key = ts("2015-09-01T16:00:00.000Z");
    store.insert(key.clone(), MetricInput::empty()).await;

    let mut handles = Vec::new();
    for metric in Metric::all_values() {
        let store = store.clone();
        let key = key.clone();
        handles.push(tokio::spawn(async move {
            let mut input = MetricInput::empty();
            input.set(metric, 1.5);
            store.patch(&key, input).await
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), MutationStatus::Updated);
    }

    let snapshot = store.snapshot().await;
    assert_eq!(
        snapshot.get(&key).copied(),
        Some(MetricValues::new(1.5, 1.5, 1.5))
    );
}
