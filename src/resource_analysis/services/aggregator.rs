use crate::ports::outbound::{Clock, MetricsBackend};
use crate::resource_analysis::domain::{MetricQuery, MetricResult};
use crate::shared::error::AnalyzerError;
use tracing::{debug, warn};

/// MetricWindowAggregator - reduces a trailing metric window to one scalar
///
/// Never fails: a backend error is logged and degrades to `MetricResult::ZERO`,
/// exactly like an empty datapoint set. Callers cannot tell "no data" from
/// "confirmed zero".
pub struct MetricWindowAggregator<'a, M: MetricsBackend, C: Clock> {
    backend: &'a M,
    clock: &'a C,
}

impl<'a, M: MetricsBackend, C: Clock> MetricWindowAggregator<'a, M, C> {
    pub fn new(backend: &'a M, clock: &'a C) -> Self {
        Self { backend, clock }
    }

    /// Aggregates `query` over the window ending now
    ///
    /// # Arguments
    /// * `query` - Metric, statistic and dimensions to request
    /// * `resource_id` - Resource the query belongs to, for logging only
    pub async fn aggregate(&self, query: &MetricQuery, resource_id: &str) -> MetricResult {
        let (start, end) = query.window(self.clock.now());

        match self.backend.get_metric_statistics(query, start, end).await {
            Ok(datapoints) => {
                let result = MetricResult::reduce(query.statistic(), &datapoints);
                debug!(
                    resource_id = %resource_id,
                    metric = %query.metric_name(),
                    statistic = %query.statistic(),
                    window_days = query.window_length_days(),
                    datapoints = datapoints.len(),
                    value = result.value(),
                    "Aggregated metric window"
                );
                result
            }
            Err(e) => {
                let error = AnalyzerError::MetricUnavailable {
                    metric: query.metric_name().to_string(),
                    resource_id: resource_id.to_string(),
                    details: e.to_string(),
                };
                warn!(
                    resource_id = %resource_id,
                    namespace = %query.namespace(),
                    error = %error,
                    "Error getting metric statistics, treating as no data"
                );
                MetricResult::ZERO
            }
        }
    }
}
