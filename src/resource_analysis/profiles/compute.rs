use super::{KindProfile, MetricValues, NamedQuery};
use crate::resource_analysis::domain::{
    attr, FindingMetadata, MetricQuery, ResourceDescriptor, ResourceKind, Statistic,
};
use crate::resource_analysis::policies::{FilterDecision, ReportFilter};
use crate::resource_analysis::services::derived_fields::{
    age_days, bytes_to_mb, decimal_value, format_percent,
};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde_json::json;

const NAMESPACE: &str = "AWS/EC2";
const DIMENSION: &str = "InstanceId";

const CPU: &str = "cpu_utilization";
const NETWORK_IN: &str = "network_in";
const NETWORK_OUT: &str = "network_out";

/// Running compute instances with CPU and network usage
pub struct ComputeProfile;

impl KindProfile for ComputeProfile {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Compute
    }

    fn issue(&self) -> &'static str {
        "running_instance"
    }

    fn noun(&self) -> &'static str {
        "EC2 instances"
    }

    fn filter(&self, descriptor: &ResourceDescriptor) -> Result<FilterDecision> {
        ReportFilter::compute(descriptor)
    }

    fn metric_queries(&self, descriptor: &ResourceDescriptor) -> Vec<NamedQuery> {
        let id = descriptor.id().as_str();
        vec![
            NamedQuery::new(
                CPU,
                MetricQuery::new(NAMESPACE, "CPUUtilization", Statistic::Average)
                    .dimension(DIMENSION, id),
            ),
            NamedQuery::new(
                NETWORK_IN,
                MetricQuery::new(NAMESPACE, "NetworkIn", Statistic::Sum).dimension(DIMENSION, id),
            ),
            NamedQuery::new(
                NETWORK_OUT,
                MetricQuery::new(NAMESPACE, "NetworkOut", Statistic::Sum).dimension(DIMENSION, id),
            ),
        ]
    }

    fn derive(
        &self,
        descriptor: &ResourceDescriptor,
        metrics: &MetricValues,
        now: DateTime<Utc>,
    ) -> Result<FindingMetadata> {
        let launch_time = descriptor.timestamp(attr::LAUNCH_TIME)?;

        let mut metadata = FindingMetadata::new();
        metadata.insert("instance_name".into(), json!(descriptor.name()));
        metadata.insert(
            "instance_type".into(),
            json!(descriptor.text(attr::INSTANCE_TYPE)?),
        );
        metadata.insert("state".into(), json!(descriptor.text(attr::STATE)?));
        metadata.insert("age_days".into(), json!(age_days(launch_time, now)));
        metadata.insert("cpu_avg_percent".into(), decimal_value(metrics.get(CPU)));
        metadata.insert(
            "network_in_mb".into(),
            json!(bytes_to_mb(metrics.get(NETWORK_IN))),
        );
        metadata.insert(
            "network_out_mb".into(),
            json!(bytes_to_mb(metrics.get(NETWORK_OUT))),
        );
        metadata.insert("launch_time".into(), json!(launch_time.to_rfc3339()));
        Ok(metadata)
    }

    fn details(&self, descriptor: &ResourceDescriptor, _metadata: &FindingMetadata) -> String {
        format!("Running EC2 instance: {}", descriptor.name())
    }

    /// Rendered from the raw average, not the stored 2-decimal value
    fn recommendation(
        &self,
        _descriptor: &ResourceDescriptor,
        _metadata: &FindingMetadata,
        metrics: &MetricValues,
    ) -> String {
        format!("CPU Avg: {}", format_percent(metrics.get(CPU)))
    }

    fn run_message(&self, findings_count: usize) -> String {
        format!("Analyzed {} running EC2 instances", findings_count)
    }
}
