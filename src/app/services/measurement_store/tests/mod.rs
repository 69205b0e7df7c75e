//! Shared test utilities and fixtures for measurement store tests

use crate::app::models::{MetricInput, MetricValues, TimestampKey};
use crate::app::services::measurement_store::MeasurementStore;

pub mod query_tests;
pub mod shared_tests;

/// Parse a canonical test timestamp
pub fn ts(value: &str) -> TimestampKey {
    TimestampKey::parse(value).unwrap()
}

/// Create complete metric input
pub fn full_input(temperature: f64, dew_point: f64, precipitation: f64) -> MetricInput {
    MetricInput::from(MetricValues::new(temperature, dew_point, precipitation))
}

/// Create a store holding the measurements used across the feature scenarios
pub fn create_test_store() -> MeasurementStore {
    let mut store = MeasurementStore::new();

    for (timestamp, values) in TEST_MEASUREMENTS {
        let (temperature, dew_point, precipitation) = *values;
        store.insert(ts(timestamp), full_input(temperature, dew_point, precipitation));
    }

    store
}

/// Assert two floats are equal within a small tolerance
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

/// Measurements spanning two days, inserted out of order on purpose
pub const TEST_MEASUREMENTS: &[(&str, (f64, f64, f64))] = &[
    ("2015-09-01T16:10:00.000Z", (27.5, 17.1, 0.0)),
    ("2015-09-01T16:00:00.000Z", (27.1, 16.7, 0.0)),
    ("2015-09-02T16:00:00.000Z", (26.9, 16.5, 2.3)),
    ("2015-09-01T16:20:00.000Z", (27.3, 16.9, 0.0)),
];
