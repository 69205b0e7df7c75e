//! Shared test utilities and fixtures for statistics tests

use crate::app::models::{Measurement, MetricValues, TimestampKey};


/// Parse a canonical test timestamp
pub fn ts(value: &str) -> TimestampKey {
    TimestampKey::parse(value).unwrap()
}

/// Create a measurement from a timestamp and three metric values
pub fn measurement(
    timestamp: &str,
    temperature: f64,
    dew_point: f64,
    precipitation: f64,
) -> Measurement {
    Measurement::new(
        ts(timestamp),
        MetricValues::new(temperature, dew_point, precipitation),
    )
}

/// Measurements from the stats feature scenarios, with one record on the next day
pub fn create_test_measurements() -> Vec<Measurement> {
    vec![
        measurement("2015-09-01T16:00:00.000Z", 27.1, 16.7, 0.0),
        measurement("2015-09-01T16:10:00.000Z", 27.3, 16.9, 0.0),
        measurement("2015-09-01T16:20:00.000Z", 27.5, 17.1, 0.0),
        measurement("2015-09-02T16:00:00.000Z", 30.0, 10.0, 12.0),
    ]
}
