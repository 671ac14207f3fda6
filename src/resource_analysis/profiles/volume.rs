use super::{metadata_bool, metadata_i64, KindProfile, MetricValues, NamedQuery};
use crate::resource_analysis::domain::{
    attr, FindingMetadata, MetricQuery, ResourceDescriptor, ResourceKind, Statistic,
};
use crate::resource_analysis::policies::{FilterDecision, ReportFilter};
use crate::resource_analysis::services::derived_fields::{age_days, bytes_to_gb, to_count};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde_json::json;

const NAMESPACE: &str = "AWS/EBS";
const DIMENSION: &str = "VolumeId";

const READ_OPS: &str = "read_ops";
const WRITE_OPS: &str = "write_ops";
const READ_BYTES: &str = "read_bytes";
const WRITE_BYTES: &str = "write_bytes";

/// Block volumes with attachment state and 7-day I/O totals
pub struct VolumeProfile;

impl VolumeProfile {
    fn is_attached(descriptor: &ResourceDescriptor) -> bool {
        descriptor.integer_or(attr::ATTACHMENT_COUNT, 0) > 0
    }
}

impl KindProfile for VolumeProfile {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Volume
    }

    fn issue(&self) -> &'static str {
        "ebs_volume"
    }

    fn noun(&self) -> &'static str {
        "EBS volumes"
    }

    fn filter(&self, descriptor: &ResourceDescriptor) -> Result<FilterDecision> {
        ReportFilter::always(descriptor)
    }

    /// Detached volumes do no I/O, so no metrics are requested for them
    fn metric_queries(&self, descriptor: &ResourceDescriptor) -> Vec<NamedQuery> {
        if !Self::is_attached(descriptor) {
            return Vec::new();
        }

        let id = descriptor.id().as_str();
        [
            (READ_OPS, "VolumeReadOps"),
            (WRITE_OPS, "VolumeWriteOps"),
            (READ_BYTES, "VolumeReadBytes"),
            (WRITE_BYTES, "VolumeWriteBytes"),
        ]
        .into_iter()
        .map(|(field, metric)| {
            NamedQuery::new(
                field,
                MetricQuery::new(NAMESPACE, metric, Statistic::Sum).dimension(DIMENSION, id),
            )
        })
        .collect()
    }

    fn derive(
        &self,
        descriptor: &ResourceDescriptor,
        metrics: &MetricValues,
        now: DateTime<Utc>,
    ) -> Result<FindingMetadata> {
        let create_time = descriptor.timestamp(attr::CREATE_TIME)?;
        let is_attached = Self::is_attached(descriptor);
        let attached_to = if is_attached {
            descriptor.optional_text(attr::ATTACHED_TO)
        } else {
            None
        };

        let mut metadata = FindingMetadata::new();
        metadata.insert("volume_name".into(), json!(descriptor.name()));
        metadata.insert(
            "volume_type".into(),
            json!(descriptor.text(attr::VOLUME_TYPE)?),
        );
        metadata.insert("size_gb".into(), json!(descriptor.integer(attr::SIZE_GB)?));
        metadata.insert("state".into(), json!(descriptor.text(attr::STATE)?));
        metadata.insert("is_attached".into(), json!(is_attached));
        metadata.insert("attached_to".into(), json!(attached_to));
        metadata.insert("age_days".into(), json!(age_days(create_time, now)));
        metadata.insert("iops".into(), json!(descriptor.integer_or(attr::IOPS, 0)));
        metadata.insert(
            "throughput_mbps".into(),
            json!(descriptor.integer_or(attr::THROUGHPUT, 0)),
        );
        metadata.insert("read_ops_7d".into(), json!(to_count(metrics.get(READ_OPS))));
        metadata.insert(
            "write_ops_7d".into(),
            json!(to_count(metrics.get(WRITE_OPS))),
        );
        metadata.insert(
            "read_gb_7d".into(),
            json!(bytes_to_gb(metrics.get(READ_BYTES))),
        );
        metadata.insert(
            "write_gb_7d".into(),
            json!(bytes_to_gb(metrics.get(WRITE_BYTES))),
        );
        metadata.insert("create_time".into(), json!(create_time.to_rfc3339()));
        Ok(metadata)
    }

    fn details(&self, descriptor: &ResourceDescriptor, metadata: &FindingMetadata) -> String {
        let state = metadata
            .get("state")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        format!("EBS Volume: {} ({})", descriptor.name(), state)
    }

    fn recommendation(
        &self,
        _descriptor: &ResourceDescriptor,
        metadata: &FindingMetadata,
        _metrics: &MetricValues,
    ) -> String {
        format!(
            "Attached: {}, Size: {}GB",
            metadata_bool(metadata, "is_attached"),
            metadata_i64(metadata, "size_gb")
        )
    }

    fn run_message(&self, findings_count: usize) -> String {
        format!("Analyzed {} EBS volumes", findings_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_analysis::domain::{AttributeValue, Datapoint, MetricResult, ResourceId};
    use chrono::{FixedOffset, TimeZone};

    fn volume(attachments: i64) -> ResourceDescriptor {
        let created = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap();
        ResourceDescriptor::new(
            ResourceId::new("vol-0abc").unwrap(),
            ResourceKind::Volume,
            Some("data".to_string()),
        )
        .with_attribute(attr::VOLUME_TYPE, AttributeValue::Text("gp3".into()))
        .with_attribute(attr::SIZE_GB, AttributeValue::Integer(100))
        .with_attribute(attr::STATE, AttributeValue::Text("in-use".into()))
        .with_attribute(attr::CREATE_TIME, AttributeValue::Timestamp(created))
        .with_attribute(attr::ATTACHMENT_COUNT, AttributeValue::Integer(attachments))
        .with_attribute(
            attr::ATTACHED_TO,
            AttributeValue::OptionalText((attachments > 0).then(|| "i-0abc".to_string())),
        )
        .with_attribute(attr::IOPS, AttributeValue::Integer(3000))
        .with_attribute(attr::THROUGHPUT, AttributeValue::Integer(125))
    }

    #[test]
    fn test_unattached_volume_requests_no_metrics() {
        assert!(VolumeProfile.metric_queries(&volume(0)).is_empty());
        assert_eq!(VolumeProfile.metric_queries(&volume(1)).len(), 4);
    }

    #[test]
    fn test_read_bytes_convert_to_gb() {
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let mut values = MetricValues::new();
        values.insert(
            READ_BYTES,
            MetricResult::reduce(Statistic::Sum, &[Datapoint::new(now, 3.0 * 1024f64.powi(3))]),
        );
        values.insert(
            READ_OPS,
            MetricResult::reduce(Statistic::Sum, &[Datapoint::new(now, 1500.7)]),
        );

        let descriptor = volume(1);
        let metadata = VolumeProfile.derive(&descriptor, &values, now).unwrap();

        assert_eq!(metadata["read_gb_7d"], 3.0);
        assert_eq!(metadata["write_gb_7d"], 0.0);
        assert_eq!(metadata["read_ops_7d"], 1500);
        assert_eq!(metadata["age_days"], 30);
        assert_eq!(metadata["is_attached"], true);
        assert_eq!(metadata["attached_to"], "i-0abc");
        assert_eq!(metadata["iops"], 3000);
        assert_eq!(metadata["throughput_mbps"], 125);
    }

    #[test]
    fn test_summary_strings() {
        let descriptor = volume(0);
        let values = MetricValues::new();
        let metadata = VolumeProfile.derive(&descriptor, &values, Utc::now()).unwrap();

        assert!(metadata["attached_to"].is_null());
        assert_eq!(
            VolumeProfile.details(&descriptor, &metadata),
            "EBS Volume: data (in-use)"
        );
        assert_eq!(
            VolumeProfile.recommendation(&descriptor, &metadata, &values),
            "Attached: false, Size: 100GB"
        );
    }
}
