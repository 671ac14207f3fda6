use super::{metadata_i64, KindProfile, MetricValues, NamedQuery};
use crate::resource_analysis::domain::{attr, FindingMetadata, ResourceDescriptor, ResourceKind};
use crate::resource_analysis::policies::{FilterDecision, ReportFilter};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde_json::json;

/// Available managed databases with more than 10 GB allocated
pub struct DatabaseProfile;

impl KindProfile for DatabaseProfile {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Database
    }

    fn issue(&self) -> &'static str {
        "running_instance_over_10gb"
    }

    fn noun(&self) -> &'static str {
        "RDS instances"
    }

    fn filter(&self, descriptor: &ResourceDescriptor) -> Result<FilterDecision> {
        ReportFilter::database(descriptor)
    }

    fn metric_queries(&self, _descriptor: &ResourceDescriptor) -> Vec<NamedQuery> {
        Vec::new()
    }

    fn derive(
        &self,
        descriptor: &ResourceDescriptor,
        _metrics: &MetricValues,
        _now: DateTime<Utc>,
    ) -> Result<FindingMetadata> {
        let mut metadata = FindingMetadata::new();
        metadata.insert(
            "instance_class".into(),
            json!(descriptor.text(attr::INSTANCE_CLASS)?),
        );
        metadata.insert("engine".into(), json!(descriptor.text(attr::ENGINE)?));
        metadata.insert(
            "storage_gb".into(),
            json!(descriptor.integer(attr::ALLOCATED_STORAGE_GB)?),
        );
        metadata.insert(
            "storage_type".into(),
            json!(descriptor.text(attr::STORAGE_TYPE)?),
        );
        metadata.insert("multi_az".into(), json!(descriptor.boolean(attr::MULTI_AZ)?));
        metadata.insert("status".into(), json!(descriptor.text(attr::STATUS)?));
        Ok(metadata)
    }

    fn details(&self, _descriptor: &ResourceDescriptor, metadata: &FindingMetadata) -> String {
        format!(
            "Running RDS instance with {}GB storage",
            metadata_i64(metadata, "storage_gb")
        )
    }

    fn recommendation(
        &self,
        _descriptor: &ResourceDescriptor,
        _metadata: &FindingMetadata,
        _metrics: &MetricValues,
    ) -> String {
        "Instance meets criteria: Running and >10GB storage".to_string()
    }

    fn run_message(&self, findings_count: usize) -> String {
        format!(
            "Found {} running RDS instances with storage > 10GB",
            findings_count
        )
    }
}
