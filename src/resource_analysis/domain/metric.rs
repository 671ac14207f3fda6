use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trailing window every analyzer aggregates over
pub const WINDOW_DAYS: i64 = 7;

/// Datapoint bucket size requested from the metrics backend (1 day)
pub const PERIOD_SECONDS: i64 = 86_400;

/// Statistic requested for a metric and the reduction applied to its datapoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    Sum,
    Average,
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Sum => write!(f, "Sum"),
            Statistic::Average => write!(f, "Average"),
        }
    }
}

/// MetricQuery - a pure description of one time-series request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricQuery {
    namespace: String,
    metric_name: String,
    statistic: Statistic,
    dimensions: Vec<(String, String)>,
    window_days: i64,
    period_seconds: i64,
}

impl MetricQuery {
    /// Creates a query over the standard 7-day window at a 1-day period
    pub fn new(
        namespace: impl Into<String>,
        metric_name: impl Into<String>,
        statistic: Statistic,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            metric_name: metric_name.into(),
            statistic,
            dimensions: Vec::new(),
            window_days: WINDOW_DAYS,
            period_seconds: PERIOD_SECONDS,
        }
    }

    /// Adds a dimension filter (e.g. `InstanceId = i-123`)
    pub fn dimension(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.push((name.into(), value.into()));
        self
    }

    /// Overrides the trailing window; used for daily storage gauges
    pub fn window_days(mut self, days: i64) -> Self {
        self.window_days = days;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn metric_name(&self) -> &str {
        &self.metric_name
    }

    pub fn statistic(&self) -> Statistic {
        self.statistic
    }

    pub fn dimensions(&self) -> &[(String, String)] {
        &self.dimensions
    }

    pub fn window_length_days(&self) -> i64 {
        self.window_days
    }

    pub fn period_seconds(&self) -> i64 {
        self.period_seconds
    }

    /// Returns `(start, end)` of the trailing window ending at `now`
    pub fn window(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - Duration::days(self.window_days), now)
    }
}

/// One value returned by the metrics backend for one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Datapoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// MetricResult - scalar reduction of a MetricQuery's datapoints
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct MetricResult(f64);

impl MetricResult {
    /// The "no data" result: empty datapoints, disabled metrics and failed calls all land here
    pub const ZERO: MetricResult = MetricResult(0.0);

    /// Reduces datapoints with the statistic's rule.
    ///
    /// `Average` is the plain mean of the per-period averages, not a
    /// time-weighted mean. Stored findings depend on these numbers.
    pub fn reduce(statistic: Statistic, datapoints: &[Datapoint]) -> Self {
        if datapoints.is_empty() {
            return Self::ZERO;
        }

        let total: f64 = datapoints.iter().map(|d| d.value).sum();
        match statistic {
            Statistic::Sum => MetricResult(total),
            Statistic::Average => MetricResult(total / datapoints.len() as f64),
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}
