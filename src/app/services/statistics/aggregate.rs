//! Single-pass aggregation of one metric's values

use crate::app::models::Statistic;

/// Running min/max/mean over the values of one metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSummary {
    /// Number of values seen
    pub count: usize,
    pub min: f64,
    pub max: f64,
    /// Running mean, updated per value so large finite inputs stay finite
    pub mean: f64,
}

impl MetricSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self {
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            mean: 0.0,
        }
    }

    /// Summarise an iterator of values in one pass
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        values.into_iter().fold(Self::new(), |mut summary, value| {
            summary.add(value);
            summary
        })
    }

    /// Fold one value into the summary
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.mean += (value - self.mean) / self.count as f64;
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Arithmetic mean, or `None` if no values were seen
    pub fn average(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.mean)
        }
    }

    /// Value of a statistic, or `None` if no values were seen
    pub fn value(&self, stat: Statistic) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        match stat {
            Statistic::Min => Some(self.min),
            Statistic::Max => Some(self.max),
            Statistic::Average => self.average(),
        }
    }
}

impl Default for MetricSummary {
    fn default() -> Self {
        Self::new()
    }
}
