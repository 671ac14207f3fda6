use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cost_optimizer::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock MetricsBackend returning canned values per metric name
///
/// Each configured value is returned as one datapoint at the window end.
/// Metrics listed in `failing` return an error.
#[derive(Default, Clone)]
pub struct MockMetricsBackend {
    pub values: HashMap<String, Vec<f64>>,
    pub failing: HashSet<String>,
    pub queries: Arc<Mutex<Vec<MetricQuery>>>,
}

impl MockMetricsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(mut self, metric_name: &str, values: &[f64]) -> Self {
        self.values.insert(metric_name.to_string(), values.to_vec());
        self
    }

    pub fn with_failure(mut self, metric_name: &str) -> Self {
        self.failing.insert(metric_name.to_string());
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl MetricsBackend for MockMetricsBackend {
    async fn get_metric_statistics(
        &self,
        query: &MetricQuery,
        _start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Datapoint>> {
        self.queries.lock().unwrap().push(query.clone());
        if self.failing.contains(query.metric_name()) {
            anyhow::bail!("Mock metrics failure for {}", query.metric_name());
        }
        Ok(self
            .values
            .get(query.metric_name())
            .map(|values| values.iter().map(|v| Datapoint::new(end, *v)).collect())
            .unwrap_or_default())
    }
}
