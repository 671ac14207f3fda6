use crate::resource_analysis::domain::{Datapoint, MetricQuery};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// MetricsBackend port for time-series statistics
///
/// Mirrors a `GetMetricStatistics`-style call: namespace, metric name and
/// dimensions come from the query, the window bounds are computed by the
/// caller, and datapoints are returned at the query's period.
#[async_trait]
pub trait MetricsBackend: Send + Sync {
    /// Fetches the datapoints of `query` between `start` and `end`
    ///
    /// # Errors
    /// Returns an error if the backend call fails or is throttled.
    async fn get_metric_statistics(
        &self,
        query: &MetricQuery,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Datapoint>>;
}
