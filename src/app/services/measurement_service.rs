//! Request-level measurement service
//!
//! This module sits between an outer request layer (the bundled script driver,
//! or any transport a caller wires up) and the shared measurement store. It
//! takes raw string input, performs the checks the store assumes were already
//! made, and maps every result to an [`Outcome`]:
//!
//! - metric values must be finite numbers, otherwise `BadRequest`
//! - replace requires all three metrics, otherwise `BadRequest`
//! - the timestamp embedded in a replace/patch request must equal the target
//!   key, otherwise `Conflict`
//! - targets that do not exist map to `NotFound`
//!
//! No call ever fails with an error; rejected requests are reported through
//! the returned [`ServiceResponse`].

use crate::app::models::{
    Measurement, Metric, MetricInput, MutationStatus, StatResult, Statistic, StatsQuery,
    TimestampKey, TimestampQuery,
};
use crate::app::services::measurement_store::SharedMeasurementStore;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// =============================================================================
// Request and Response Types
// =============================================================================

/// A measurement request body with raw, unvalidated field values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRequest {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub temperature: Option<String>,
    #[serde(default)]
    pub dew_point: Option<String>,
    #[serde(default)]
    pub precipitation: Option<String>,
}

impl MeasurementRequest {
    /// Create a request carrying only an embedded timestamp
    pub fn with_timestamp(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            ..Default::default()
        }
    }

    /// Set the raw value of a single metric
    pub fn set_metric(&mut self, metric: Metric, raw: impl Into<String>) {
        let raw = Some(raw.into());
        match metric {
            Metric::Temperature => self.temperature = raw,
            Metric::DewPoint => self.dew_point = raw,
            Metric::Precipitation => self.precipitation = raw,
        }
    }

    /// Builder form of [`MeasurementRequest::set_metric`]
    pub fn metric(mut self, metric: Metric, raw: impl Into<String>) -> Self {
        self.set_metric(metric, raw);
        self
    }

    fn raw_metric(&self, metric: Metric) -> Option<&str> {
        match metric {
            Metric::Temperature => self.temperature.as_deref(),
            Metric::DewPoint => self.dew_point.as_deref(),
            Metric::Precipitation => self.precipitation.as_deref(),
        }
    }

    /// Parse the supplied metric values, rejecting non-numeric or non-finite input
    pub fn metric_input(&self) -> Result<MetricInput> {
        let mut input = MetricInput::empty();

        for metric in Metric::all_values() {
            if let Some(raw) = self.raw_metric(metric) {
                input.set(metric, parse_metric_value(metric, raw)?);
            }
        }

        Ok(input)
    }
}

/// A statistics request with raw metric/stat names and range bounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRequest {
    pub metrics: Vec<String>,
    pub stats: Vec<String>,
    pub from_date_time: String,
    pub to_date_time: String,
}

impl StatsRequest {
    /// Resolve names and bounds into a validated query
    pub fn to_query(&self) -> Result<StatsQuery> {
        let metrics = self
            .metrics
            .iter()
            .map(|name| name.parse::<Metric>())
            .collect::<Result<Vec<_>>>()?;
        let stats = self
            .stats
            .iter()
            .map(|name| name.parse::<Statistic>())
            .collect::<Result<Vec<_>>>()?;

        let from = TimestampKey::parse(&self.from_date_time)?;
        let to = TimestampKey::parse(&self.to_date_time)?;

        StatsQuery::new(metrics, stats, from, to)
    }
}

/// Kind of response produced by the service, mirroring an HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Created,
    Ok,
    NoContent,
    BadRequest,
    NotFound,
    Conflict,
}

impl Outcome {
    /// Conventional numeric status code for this outcome
    pub fn status_code(self) -> u16 {
        match self {
            Outcome::Created => 201,
            Outcome::Ok => 200,
            Outcome::NoContent => 204,
            Outcome::BadRequest => 400,
            Outcome::NotFound => 404,
            Outcome::Conflict => 409,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Created | Outcome::Ok | Outcome::NoContent)
    }
}

impl From<MutationStatus> for Outcome {
    fn from(status: MutationStatus) -> Self {
        match status {
            MutationStatus::Updated => Outcome::NoContent,
            MutationStatus::Conflict => Outcome::Conflict,
            MutationStatus::NotFound => Outcome::NotFound,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Outcome::Created => "created",
            Outcome::Ok => "ok",
            Outcome::NoContent => "no_content",
            Outcome::BadRequest => "bad_request",
            Outcome::NotFound => "not_found",
            Outcome::Conflict => "conflict",
        };
        write!(f, "{} ({})", name, self.status_code())
    }
}

/// Payload attached to a response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Measurements(Vec<Measurement>),
    Statistics(Vec<StatResult>),
    Error { error: String },
}

/// Outcome of a service call plus an optional payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceResponse {
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ResponseBody>,
}

impl ServiceResponse {
    /// Response without a payload
    pub fn empty(outcome: Outcome) -> Self {
        Self {
            outcome,
            body: None,
        }
    }

    /// Response carrying a payload
    pub fn with_body(outcome: Outcome, body: ResponseBody) -> Self {
        Self {
            outcome,
            body: Some(body),
        }
    }

    /// Response for a rejected request, keeping the reason
    pub fn rejected(outcome: Outcome, error: &Error) -> Self {
        warn!("Request rejected with {}: {}", outcome, error);
        Self::with_body(
            outcome,
            ResponseBody::Error {
                error: error.to_string(),
            },
        )
    }

    pub fn measurements(&self) -> Option<&[Measurement]> {
        match &self.body {
            Some(ResponseBody::Measurements(measurements)) => Some(measurements),
            _ => None,
        }
    }

    pub fn statistics(&self) -> Option<&[StatResult]> {
        match &self.body {
            Some(ResponseBody::Statistics(results)) => Some(results),
            _ => None,
        }
    }
}

// =============================================================================
// Measurement Service
// =============================================================================

/// Request-level operations over a shared measurement store
#[derive(Debug, Clone, Default)]
pub struct MeasurementService {
    store: SharedMeasurementStore,
}

impl MeasurementService {
    /// Create a service over a shared store
    pub fn new(store: SharedMeasurementStore) -> Self {
        Self { store }
    }

    /// The underlying shared store
    pub fn store(&self) -> &SharedMeasurementStore {
        &self.store
    }

    /// Create (or overwrite) a measurement; absent metrics default to zero
    pub async fn create(&self, request: &MeasurementRequest) -> ServiceResponse {
        debug!("create {:?}", request);

        let timestamp = match request.timestamp.as_deref() {
            Some(raw) => match TimestampKey::parse(raw) {
                Ok(key) => key,
                Err(e) => return ServiceResponse::rejected(Outcome::BadRequest, &e),
            },
            None => {
                return ServiceResponse::rejected(
                    Outcome::BadRequest,
                    &Error::invalid_input("measurement timestamp is required"),
                );
            }
        };

        let input = match request.metric_input() {
            Ok(input) => input,
            Err(e) => return ServiceResponse::rejected(Outcome::BadRequest, &e),
        };

        self.store.insert(timestamp, input).await;
        ServiceResponse::empty(Outcome::Created)
    }

    /// Look up measurements by exact instant or timestamp prefix
    pub async fn get(&self, key: &str) -> ServiceResponse {
        debug!("get {}", key);

        let query = match TimestampQuery::parse(key) {
            Ok(query) => query,
            // A key that is neither an instant nor a prefix can never match
            Err(e) => return ServiceResponse::rejected(Outcome::NotFound, &e),
        };

        let measurements = self.store.lookup(&query).await;
        if measurements.is_empty() {
            ServiceResponse::empty(Outcome::NotFound)
        } else {
            ServiceResponse::with_body(Outcome::Ok, ResponseBody::Measurements(measurements))
        }
    }

    /// Replace all three metrics of the measurement at `key`
    pub async fn replace(&self, key: &str, request: &MeasurementRequest) -> ServiceResponse {
        debug!("replace {} with {:?}", key, request);

        let input = match request.metric_input() {
            Ok(input) => input,
            Err(e) => return ServiceResponse::rejected(Outcome::BadRequest, &e),
        };

        let values = match input.complete() {
            Some(values) => values,
            None => {
                let missing: Vec<&str> = input
                    .missing_metrics()
                    .into_iter()
                    .map(Metric::name)
                    .collect();
                return ServiceResponse::rejected(
                    Outcome::BadRequest,
                    &Error::invalid_input(format!(
                        "replace requires every metric, missing: {}",
                        missing.join(", ")
                    )),
                );
            }
        };

        let target = match resolve_target(key, request) {
            Ok(target) => target,
            Err(response) => return response,
        };

        let status = self.store.replace(&target, values).await;
        ServiceResponse::empty(status.into())
    }

    /// Overwrite only the supplied metrics of the measurement at `key`
    pub async fn patch(&self, key: &str, request: &MeasurementRequest) -> ServiceResponse {
        debug!("patch {} with {:?}", key, request);

        let input = match request.metric_input() {
            Ok(input) => input,
            Err(e) => return ServiceResponse::rejected(Outcome::BadRequest, &e),
        };

        let target = match resolve_target(key, request) {
            Ok(target) => target,
            Err(response) => return response,
        };

        let status = self.store.patch(&target, input).await;
        ServiceResponse::empty(status.into())
    }

    /// Delete the measurement at an exact instant
    pub async fn delete(&self, key: &str) -> ServiceResponse {
        debug!("delete {}", key);

        let target = match TimestampKey::parse(key) {
            Ok(target) => target,
            Err(e) => return ServiceResponse::rejected(Outcome::NotFound, &e),
        };

        match self.store.delete(&target).await {
            Some(_) => ServiceResponse::empty(Outcome::NoContent),
            None => ServiceResponse::empty(Outcome::NotFound),
        }
    }

    /// Compute statistics; an empty window yields an empty list, not an error
    pub async fn stats(&self, request: &StatsRequest) -> ServiceResponse {
        debug!("stats {:?}", request);

        let query = match request.to_query() {
            Ok(query) => query,
            Err(e) => return ServiceResponse::rejected(Outcome::BadRequest, &e),
        };

        let results = self.store.statistics(&query).await;
        ServiceResponse::with_body(Outcome::Ok, ResponseBody::Statistics(results))
    }
}

/// Parse a raw metric value as a finite float
fn parse_metric_value(metric: Metric, raw: &str) -> Result<f64> {
    let value = raw.trim().parse::<f64>().map_err(|_| {
        Error::invalid_input(format!("{} value '{}' is not a number", metric, raw))
    })?;

    if !value.is_finite() {
        return Err(Error::invalid_input(format!(
            "{} value '{}' is not finite",
            metric, raw
        )));
    }

    Ok(value)
}

/// Resolve the target key of a replace/patch and check it against the body's timestamp
fn resolve_target(
    key: &str,
    request: &MeasurementRequest,
) -> std::result::Result<TimestampKey, ServiceResponse> {
    let embedded = match request.timestamp.as_deref() {
        Some(raw) => TimestampKey::parse(raw)
            .map_err(|e| ServiceResponse::rejected(Outcome::BadRequest, &e))?,
        None => {
            return Err(ServiceResponse::rejected(
                Outcome::BadRequest,
                &Error::invalid_input("measurement timestamp is required"),
            ));
        }
    };

    let target = TimestampKey::parse(key)
        .map_err(|e| ServiceResponse::rejected(Outcome::NotFound, &e))?;

    if embedded != target {
        warn!(
            "Timestamp {} in request does not match target {}",
            embedded, target
        );
        return Err(ServiceResponse::empty(MutationStatus::Conflict.into()));
    }

    Ok(target)
}
