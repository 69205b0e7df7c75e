//! Tests for exact, prefix and range reads

use super::*;
use crate::app::models::{Measurement, TimestampQuery};

#[test]
fn test_exact_lookup_returns_single_record() {
    let store = create_test_store();

    let query = TimestampQuery::parse("2015-09-01T16:00:00.000Z").unwrap();
    let results = store.lookup(&query);

    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0],
        Measurement::new(
            ts("2015-09-01T16:00:00.000Z"),
            MetricValues::new(27.1, 16.7, 0.0)
        )
    );
}

#[test]
fn test_exact_lookup_missing_returns_empty() {
    let store = create_test_store();

    let query = TimestampQuery::parse("2015-09-01T16:05:00.000Z").unwrap();
    assert!(store.lookup(&query).is_empty());
}

#[test]
fn test_exact_lookup_normalises_input_form() {
    let store = create_test_store();

    // Same instant without milliseconds and with an offset
    let query = TimestampQuery::parse("2015-09-01T18:00:00+02:00").unwrap();
    assert_eq!(store.lookup(&query).len(), 1);
}

#[test]
fn test_prefix_lookup_returns_day_in_ascending_order() {
    let store = create_test_store();

    let query = TimestampQuery::parse("2015-09-01").unwrap();
    let results = store.lookup(&query);

    let timestamps: Vec<&str> = results.iter().map(|m| m.timestamp.as_str()).collect();
    assert_eq!(
        timestamps,
        vec![
            "2015-09-01T16:00:00.000Z",
            "2015-09-01T16:10:00.000Z",
            "2015-09-01T16:20:00.000Z",
        ]
    );
}

#[test]
fn test_prefix_lookup_scenario_two_records() {
    let mut store = MeasurementStore::new();
    store.insert(ts("2015-09-01T16:00:00.000Z"), full_input(27.1, 16.7, 0.0));
    store.insert(ts("2015-09-01T16:01:00.000Z"), full_input(27.3, 16.9, 0.0));

    let results = store.lookup(&TimestampQuery::parse("2015-09-01").unwrap());

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].timestamp.as_str(), "2015-09-01T16:00:00.000Z");
    assert_eq!(results[1].timestamp.as_str(), "2015-09-01T16:01:00.000Z");
    assert_close(results[1].values.temperature, 27.3);
}

#[test]
fn test_prefix_lookup_only_matches_prefix() {
    let store = create_test_store();

    let month = store.lookup(&TimestampQuery::parse("2015-09").unwrap());
    assert_eq!(month.len(), 4);

    let hour = store.lookup(&TimestampQuery::parse("2015-09-01T16:1").unwrap());
    assert_eq!(hour.len(), 1);
    assert_eq!(hour[0].timestamp.as_str(), "2015-09-01T16:10:00.000Z");

    let other_day = store.lookup(&TimestampQuery::parse("2015-09-03").unwrap());
    assert!(other_day.is_empty());
}

#[test]
fn test_range_is_inclusive_and_ordered() {
    let store = create_test_store();

    let results = store.range(
        &ts("2015-09-01T16:00:00.000Z"),
        &ts("2015-09-01T16:20:00.000Z"),
    );

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].timestamp.as_str(), "2015-09-01T16:00:00.000Z");
    assert_eq!(results[2].timestamp.as_str(), "2015-09-01T16:20:00.000Z");
}

#[test]
fn test_range_inverted_is_empty() {
    let store = create_test_store();

    let results = store.range(
        &ts("2015-09-02T00:00:00.000Z"),
        &ts("2015-09-01T00:00:00.000Z"),
    );
    assert!(results.is_empty());
}

#[test]
fn test_get_and_contains() {
    let store = create_test_store();
    let key = ts("2015-09-02T16:00:00.000Z");

    assert!(store.contains(&key));
    assert_close(store.get(&key).unwrap().precipitation, 2.3);
    assert!(store.get(&ts("2015-09-03T16:00:00.000Z")).is_none());
    assert_eq!(store.measurements().len(), store.len());
}
