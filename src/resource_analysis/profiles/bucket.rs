use super::{metadata_f64, metadata_i64, KindProfile, MetricValues, NamedQuery};
use crate::resource_analysis::domain::{
    attr, FindingMetadata, MetricQuery, ResourceDescriptor, ResourceKind, Statistic,
};
use crate::resource_analysis::policies::{FilterDecision, ReportFilter};
use crate::resource_analysis::services::derived_fields::{
    age_days, bytes_to_gb, format_thousands, to_count,
};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde_json::json;

const NAMESPACE: &str = "AWS/S3";
const BUCKET_DIMENSION: &str = "BucketName";
const STORAGE_TYPE_DIMENSION: &str = "StorageType";

/// Storage gauges are published once a day
const GAUGE_WINDOW_DAYS: i64 = 1;

const SIZE_BYTES: &str = "size_bytes";
const OBJECT_COUNT: &str = "object_count";
const GET_REQUESTS: &str = "get_requests";
const PUT_REQUESTS: &str = "put_requests";

/// Object storage buckets with size, request counts and configuration
pub struct BucketProfile;

impl KindProfile for BucketProfile {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Bucket
    }

    fn issue(&self) -> &'static str {
        "s3_bucket"
    }

    fn noun(&self) -> &'static str {
        "S3 buckets"
    }

    fn filter(&self, descriptor: &ResourceDescriptor) -> Result<FilterDecision> {
        ReportFilter::always(descriptor)
    }

    fn metric_queries(&self, descriptor: &ResourceDescriptor) -> Vec<NamedQuery> {
        let bucket = descriptor.id().as_str();
        vec![
            NamedQuery::new(
                SIZE_BYTES,
                MetricQuery::new(NAMESPACE, "BucketSizeBytes", Statistic::Average)
                    .dimension(BUCKET_DIMENSION, bucket)
                    .dimension(STORAGE_TYPE_DIMENSION, "StandardStorage")
                    .window_days(GAUGE_WINDOW_DAYS),
            ),
            NamedQuery::new(
                OBJECT_COUNT,
                MetricQuery::new(NAMESPACE, "NumberOfObjects", Statistic::Average)
                    .dimension(BUCKET_DIMENSION, bucket)
                    .dimension(STORAGE_TYPE_DIMENSION, "AllStorageTypes")
                    .window_days(GAUGE_WINDOW_DAYS),
            ),
            NamedQuery::new(
                GET_REQUESTS,
                MetricQuery::new(NAMESPACE, "GetRequests", Statistic::Sum)
                    .dimension(BUCKET_DIMENSION, bucket),
            ),
            NamedQuery::new(
                PUT_REQUESTS,
                MetricQuery::new(NAMESPACE, "PutRequests", Statistic::Sum)
                    .dimension(BUCKET_DIMENSION, bucket),
            ),
        ]
    }

    fn derive(
        &self,
        descriptor: &ResourceDescriptor,
        metrics: &MetricValues,
        now: DateTime<Utc>,
    ) -> Result<FindingMetadata> {
        let creation_date = descriptor.timestamp(attr::CREATION_DATE)?;
        let storage_classes = descriptor
            .counts(attr::STORAGE_CLASSES)
            .cloned()
            .unwrap_or_default();

        let mut metadata = FindingMetadata::new();
        metadata.insert("bucket_name".into(), json!(descriptor.id().as_str()));
        metadata.insert("region".into(), json!(descriptor.text(attr::REGION)?));
        metadata.insert("age_days".into(), json!(age_days(creation_date, now)));
        metadata.insert(
            "size_gb".into(),
            json!(bytes_to_gb(metrics.get(SIZE_BYTES))),
        );
        metadata.insert(
            "object_count".into(),
            json!(to_count(metrics.get(OBJECT_COUNT))),
        );
        metadata.insert("storage_classes".into(), json!(storage_classes));
        metadata.insert(
            "versioning_enabled".into(),
            json!(descriptor.boolean(attr::VERSIONING_ENABLED)?),
        );
        metadata.insert(
            "is_public".into(),
            json!(descriptor.boolean(attr::IS_PUBLIC)?),
        );
        metadata.insert(
            "get_requests_7d".into(),
            json!(to_count(metrics.get(GET_REQUESTS))),
        );
        metadata.insert(
            "put_requests_7d".into(),
            json!(to_count(metrics.get(PUT_REQUESTS))),
        );
        metadata.insert("creation_date".into(), json!(creation_date.to_rfc3339()));
        Ok(metadata)
    }

    fn details(&self, descriptor: &ResourceDescriptor, _metadata: &FindingMetadata) -> String {
        format!("S3 Bucket: {}", descriptor.id())
    }

    fn recommendation(
        &self,
        _descriptor: &ResourceDescriptor,
        metadata: &FindingMetadata,
        _metrics: &MetricValues,
    ) -> String {
        format!(
            "Size: {:.2}GB, Objects: {}",
            metadata_f64(metadata, "size_gb"),
            format_thousands(metadata_i64(metadata, "object_count"))
        )
    }

    fn run_message(&self, findings_count: usize) -> String {
        format!("Analyzed {} S3 buckets", findings_count)
    }
}
