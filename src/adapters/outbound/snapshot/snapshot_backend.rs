use super::model::{
    name_tag, BucketModel, DbInstanceModel, InstanceModel, MetricSeriesModel, Snapshot,
    VolumeModel,
};
use crate::ports::outbound::{InventoryBackend, MetricsBackend, ObjectSummary, PublicAccessBlock};
use crate::resource_analysis::domain::{
    attr, AttributeValue, Datapoint, MetricQuery, ResourceDescriptor, ResourceId, ResourceKind,
    Statistic,
};
use crate::shared::error::AnalyzerError;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Maximum snapshot file size (100 MB)
const MAX_SNAPSHOT_SIZE: u64 = 100 * 1024 * 1024;

/// SnapshotBackend adapter serving inventory and metrics from a JSON snapshot
///
/// Implements both InventoryBackend and MetricsBackend over one parsed
/// document, so a recorded provider state can be analysed offline. Cloning
/// is cheap; clones share the parsed snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotBackend {
    snapshot: Arc<Snapshot>,
}

impl SnapshotBackend {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    /// Parses a snapshot from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(content)?;
        Ok(Self::new(snapshot))
    }

    /// Loads a snapshot file with security checks:
    /// - Reject symbolic links
    /// - Check file size limits
    /// - Validate file is a regular file
    pub fn load(path: &Path) -> Result<Self> {
        let read_error = |details: String| AnalyzerError::SnapshotReadError {
            path: path.to_path_buf(),
            details,
        };

        let metadata = fs::symlink_metadata(path).map_err(|e| read_error(e.to_string()))?;
        if metadata.is_symlink() {
            return Err(read_error(
                "Security: snapshot is a symbolic link. For security reasons, symbolic links are not allowed."
                    .to_string(),
            )
            .into());
        }
        if !metadata.is_file() {
            return Err(read_error("not a regular file".to_string()).into());
        }
        if metadata.len() > MAX_SNAPSHOT_SIZE {
            return Err(read_error(format!(
                "file is too large ({} bytes). Maximum allowed size is {} bytes.",
                metadata.len(),
                MAX_SNAPSHOT_SIZE
            ))
            .into());
        }

        let content = fs::read_to_string(path).map_err(|e| read_error(e.to_string()))?;
        Self::from_json(&content).map_err(|e| read_error(e.to_string()).into())
    }

    fn bucket(&self, name: &str) -> Result<&BucketModel> {
        self.snapshot
            .buckets
            .iter()
            .find(|bucket| bucket.name == name)
            .ok_or_else(|| anyhow::anyhow!("NoSuchBucket: {}", name))
    }

    fn series(&self, query: &MetricQuery) -> Option<&MetricSeriesModel> {
        self.snapshot.metrics.iter().find(|series| {
            series.namespace == query.namespace()
                && series.metric_name == query.metric_name()
                && series.dimensions.len() == query.dimensions().len()
                && query.dimensions().iter().all(|(name, value)| {
                    series
                        .dimensions
                        .iter()
                        .any(|d| &d.name == name && &d.value == value)
                })
        })
    }
}

fn resource_id(raw: &str) -> Result<ResourceId> {
    ResourceId::new(raw)
}

fn instance_descriptor(instance: &InstanceModel) -> Result<ResourceDescriptor> {
    Ok(ResourceDescriptor::new(
        resource_id(&instance.instance_id)?,
        ResourceKind::Compute,
        name_tag(&instance.tags),
    )
    .with_attribute(
        attr::INSTANCE_TYPE,
        AttributeValue::Text(instance.instance_type.clone()),
    )
    .with_attribute(attr::STATE, AttributeValue::Text(instance.state.clone()))
    .with_attribute(
        attr::LAUNCH_TIME,
        AttributeValue::Timestamp(instance.launch_time),
    ))
}

fn volume_descriptor(volume: &VolumeModel) -> Result<ResourceDescriptor> {
    let attached_to = volume
        .attachments
        .first()
        .map(|attachment| attachment.instance_id.clone());

    let mut descriptor = ResourceDescriptor::new(
        resource_id(&volume.volume_id)?,
        ResourceKind::Volume,
        name_tag(&volume.tags),
    )
    .with_attribute(
        attr::VOLUME_TYPE,
        AttributeValue::Text(volume.volume_type.clone()),
    )
    .with_attribute(attr::SIZE_GB, AttributeValue::Integer(volume.size))
    .with_attribute(attr::STATE, AttributeValue::Text(volume.state.clone()))
    .with_attribute(attr::CREATE_TIME, AttributeValue::Timestamp(volume.create_time))
    .with_attribute(
        attr::ATTACHMENT_COUNT,
        AttributeValue::Integer(volume.attachments.len() as i64),
    )
    .with_attribute(attr::ATTACHED_TO, AttributeValue::OptionalText(attached_to));

    if let Some(iops) = volume.iops {
        descriptor = descriptor.with_attribute(attr::IOPS, AttributeValue::Integer(iops));
    }
    if let Some(throughput) = volume.throughput {
        descriptor =
            descriptor.with_attribute(attr::THROUGHPUT, AttributeValue::Integer(throughput));
    }
    Ok(descriptor)
}

fn database_descriptor(db: &DbInstanceModel) -> Result<ResourceDescriptor> {
    Ok(ResourceDescriptor::new(
        resource_id(&db.db_instance_identifier)?,
        ResourceKind::Database,
        None,
    )
    .with_attribute(
        attr::INSTANCE_CLASS,
        AttributeValue::Text(db.db_instance_class.clone()),
    )
    .with_attribute(attr::ENGINE, AttributeValue::Text(db.engine.clone()))
    .with_attribute(
        attr::STATUS,
        AttributeValue::Text(db.db_instance_status.clone()),
    )
    .with_attribute(attr::MULTI_AZ, AttributeValue::Boolean(db.multi_az))
    .with_attribute(
        attr::STORAGE_TYPE,
        AttributeValue::Text(db.storage_type.clone()),
    )
    .with_attribute(
        attr::ALLOCATED_STORAGE_GB,
        AttributeValue::Integer(db.allocated_storage),
    ))
}

fn bucket_descriptor(bucket: &BucketModel) -> Result<ResourceDescriptor> {
    Ok(ResourceDescriptor::new(
        resource_id(&bucket.name)?,
        ResourceKind::Bucket,
        Some(bucket.name.clone()),
    )
    .with_attribute(
        attr::CREATION_DATE,
        AttributeValue::Timestamp(bucket.creation_date),
    ))
}

/// Maps every record, dropping the ones that do not form a valid descriptor.
/// A bad record affects only itself, never the listing.
fn valid_descriptors<T>(
    kind: ResourceKind,
    records: &[T],
    describe: fn(&T) -> Result<ResourceDescriptor>,
) -> Vec<ResourceDescriptor> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match describe(record) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                warn!(%kind, index, error = %e, "Skipping malformed inventory record");
                None
            }
        })
        .collect()
}

/// Merges datapoints into one per `period_seconds` bucket counted from `start`.
/// Sums add up within a bucket, averages are averaged.
fn per_period(
    points: Vec<Datapoint>,
    statistic: Statistic,
    start: DateTime<Utc>,
    period_seconds: i64,
) -> Vec<Datapoint> {
    let period = period_seconds.max(1);
    let mut buckets: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
    for point in points {
        let index = (point.timestamp - start).num_seconds().div_euclid(period);
        let entry = buckets.entry(index).or_insert((0.0, 0));
        entry.0 += point.value;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(index, (total, count))| {
            let value = match statistic {
                Statistic::Sum => total,
                Statistic::Average => total / count as f64,
            };
            Datapoint::new(start + Duration::seconds(index * period), value)
        })
        .collect()
}

#[async_trait]
impl InventoryBackend for SnapshotBackend {
    async fn list_resources(&self, kind: ResourceKind) -> Result<Vec<ResourceDescriptor>> {
        if self.snapshot.fail_listing.contains(&kind) {
            anyhow::bail!("AccessDenied: listing {} resources is not permitted", kind);
        }

        let snapshot = &self.snapshot;
        Ok(match kind {
            ResourceKind::Compute => valid_descriptors(kind, &snapshot.instances, instance_descriptor),
            ResourceKind::Volume => valid_descriptors(kind, &snapshot.volumes, volume_descriptor),
            ResourceKind::Database => {
                valid_descriptors(kind, &snapshot.db_instances, database_descriptor)
            }
            ResourceKind::Bucket => valid_descriptors(kind, &snapshot.buckets, bucket_descriptor),
        })
    }

    async fn bucket_region(&self, bucket: &str) -> Result<Option<String>> {
        let location = self
            .bucket(bucket)?
            .location
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("AccessDenied: GetBucketLocation"))?;
        Ok(location.location_constraint.clone())
    }

    async fn bucket_versioning(&self, bucket: &str) -> Result<Option<String>> {
        let versioning = self
            .bucket(bucket)?
            .versioning
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("AccessDenied: GetBucketVersioning"))?;
        Ok(versioning.status.clone())
    }

    async fn public_access_block(&self, bucket: &str) -> Result<PublicAccessBlock> {
        let block = self
            .bucket(bucket)?
            .public_access_block
            .ok_or_else(|| anyhow::anyhow!("NoSuchPublicAccessBlockConfiguration"))?;
        Ok(PublicAccessBlock {
            block_public_acls: block.block_public_acls,
            ignore_public_acls: block.ignore_public_acls,
            block_public_policy: block.block_public_policy,
            restrict_public_buckets: block.restrict_public_buckets,
        })
    }

    async fn list_objects(&self, bucket: &str, max_keys: usize) -> Result<Vec<ObjectSummary>> {
        let objects = self
            .bucket(bucket)?
            .objects
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("AccessDenied: ListObjectsV2"))?;
        Ok(objects
            .iter()
            .take(max_keys)
            .map(|object| ObjectSummary {
                storage_class: object.storage_class.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl MetricsBackend for SnapshotBackend {
    async fn get_metric_statistics(
        &self,
        query: &MetricQuery,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Datapoint>> {
        let Some(series) = self.series(query) else {
            return Ok(Vec::new());
        };
        if series.fail {
            anyhow::bail!(
                "Throttling: rate exceeded for {}/{}",
                query.namespace(),
                query.metric_name()
            );
        }

        let points = series
            .datapoints
            .iter()
            .filter(|dp| dp.timestamp >= start && dp.timestamp <= end)
            .filter_map(|dp| {
                let value = match query.statistic() {
                    Statistic::Sum => dp.sum,
                    Statistic::Average => dp.average,
                };
                value.map(|v| Datapoint::new(dp.timestamp, v))
            })
            .collect();
        Ok(per_period(
            points,
            query.statistic(),
            start,
            query.period_seconds(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SNAPSHOT: &str = r#"{
        "instances": [
            {
                "instance_id": "i-0abc",
                "instance_type": "t3.micro",
                "state": "running",
                "launch_time": "2024-04-01T00:00:00Z",
                "tags": [{"key": "Name", "value": "web-1"}]
            }
        ],
        "volumes": [
            {
                "volume_id": "vol-1",
                "volume_type": "gp3",
                "size": 100,
                "state": "in-use",
                "create_time": "2024-01-01T00:00:00+00:00",
                "attachments": [{"instance_id": "i-0abc"}],
                "iops": 3000
            }
        ],
        "buckets": [
            {
                "name": "logs",
                "creation_date": "2023-01-01T00:00:00Z",
                "location": {"location_constraint": null},
                "objects": [
                    {"key": "a", "storage_class": "GLACIER"},
                    {"key": "b"}
                ]
            }
        ],
        "metrics": [
            {
                "namespace": "AWS/EC2",
                "metric_name": "CPUUtilization",
                "dimensions": [{"name": "InstanceId", "value": "i-0abc"}],
                "datapoints": [
                    {"timestamp": "2024-05-06T00:00:00Z", "average": 10.0},
                    {"timestamp": "2024-05-07T00:00:00Z", "average": 20.0},
                    {"timestamp": "2024-04-01T00:00:00Z", "average": 90.0}
                ]
            },
            {
                "namespace": "AWS/EC2",
                "metric_name": "NetworkIn",
                "dimensions": [{"name": "InstanceId", "value": "i-0abc"}],
                "fail": true
            }
        ],
        "fail_listing": ["database"]
    }"#;

    fn backend() -> SnapshotBackend {
        SnapshotBackend::from_json(SNAPSHOT).unwrap()
    }

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        let end = Utc.with_ymd_and_hms(2024, 5, 8, 0, 0, 0).unwrap();
        (end - Duration::days(7), end)
    }

    #[tokio::test]
    async fn test_list_instances_with_name_tag() {
        let resources = backend()
            .list_resources(ResourceKind::Compute)
            .await
            .unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].id().as_str(), "i-0abc");
        assert_eq!(resources[0].name(), "web-1");
        assert_eq!(resources[0].text(attr::STATE).unwrap(), "running");
    }

    #[tokio::test]
    async fn test_list_volumes_maps_attachments() {
        let resources = backend().list_resources(ResourceKind::Volume).await.unwrap();
        let volume = &resources[0];
        assert_eq!(volume.name(), "N/A");
        assert_eq!(volume.integer(attr::ATTACHMENT_COUNT).unwrap(), 1);
        assert_eq!(volume.optional_text(attr::ATTACHED_TO), Some("i-0abc"));
        assert_eq!(volume.integer_or(attr::IOPS, 0), 3000);
        assert_eq!(volume.integer_or(attr::THROUGHPUT, 0), 0);
    }

    #[tokio::test]
    async fn test_fail_listing() {
        let result = backend().list_resources(ResourceKind::Database).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_bucket_lookups_fail() {
        let backend = backend();
        assert_eq!(backend.bucket_region("logs").await.unwrap(), None);
        assert!(backend.bucket_versioning("logs").await.is_err());
        assert!(backend.public_access_block("logs").await.is_err());
        assert!(backend.bucket_region("unknown-bucket").await.is_err());

        let objects = backend.list_objects("logs", 1).await.unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].storage_class.as_deref(), Some("GLACIER"));
    }

    #[tokio::test]
    async fn test_metric_datapoints_filtered_to_window() {
        let query = MetricQuery::new("AWS/EC2", "CPUUtilization", Statistic::Average)
            .dimension("InstanceId", "i-0abc");
        let (start, end) = window();
        let datapoints = backend()
            .get_metric_statistics(&query, start, end)
            .await
            .unwrap();

        let values: Vec<f64> = datapoints.iter().map(|dp| dp.value).collect();
        assert_eq!(values, vec![10.0, 20.0]);
    }

    #[tokio::test]
    async fn test_metric_datapoints_merged_per_period() {
        let snapshot = r#"{
            "metrics": [
                {
                    "namespace": "AWS/EBS",
                    "metric_name": "VolumeReadOps",
                    "dimensions": [{"name": "VolumeId", "value": "vol-1"}],
                    "datapoints": [
                        {"timestamp": "2024-05-02T01:00:00Z", "sum": 100.0, "average": 10.0},
                        {"timestamp": "2024-05-02T13:00:00Z", "sum": 50.0, "average": 20.0},
                        {"timestamp": "2024-05-03T00:00:00Z", "sum": 5.0, "average": 6.0}
                    ]
                }
            ]
        }"#;
        let backend = SnapshotBackend::from_json(snapshot).unwrap();
        let (start, end) = window();

        let sum = MetricQuery::new("AWS/EBS", "VolumeReadOps", Statistic::Sum)
            .dimension("VolumeId", "vol-1");
        let datapoints = backend.get_metric_statistics(&sum, start, end).await.unwrap();
        let values: Vec<f64> = datapoints.iter().map(|dp| dp.value).collect();
        assert_eq!(values, vec![150.0, 5.0]);
        assert_eq!(
            datapoints[0].timestamp,
            Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap()
        );

        let average = MetricQuery::new("AWS/EBS", "VolumeReadOps", Statistic::Average)
            .dimension("VolumeId", "vol-1");
        let datapoints = backend
            .get_metric_statistics(&average, start, end)
            .await
            .unwrap();
        let values: Vec<f64> = datapoints.iter().map(|dp| dp.value).collect();
        assert_eq!(values, vec![15.0, 6.0]);
    }

    #[tokio::test]
    async fn test_malformed_record_skipped_not_fatal() {
        let snapshot = r#"{
            "buckets": [
                {"name": "good-bucket", "creation_date": "2023-01-01T00:00:00Z"},
                {"name": " ", "creation_date": "2023-01-01T00:00:00Z"}
            ]
        }"#;
        let backend = SnapshotBackend::from_json(snapshot).unwrap();

        let resources = backend.list_resources(ResourceKind::Bucket).await.unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].id().as_str(), "good-bucket");
    }

    #[tokio::test]
    async fn test_metric_statistic_mismatch_yields_nothing() {
        let query = MetricQuery::new("AWS/EC2", "CPUUtilization", Statistic::Sum)
            .dimension("InstanceId", "i-0abc");
        let (start, end) = window();
        let datapoints = backend()
            .get_metric_statistics(&query, start, end)
            .await
            .unwrap();
        assert!(datapoints.is_empty());
    }

    #[tokio::test]
    async fn test_failing_series_and_unknown_series() {
        let (start, end) = window();
        let failing = MetricQuery::new("AWS/EC2", "NetworkIn", Statistic::Sum)
            .dimension("InstanceId", "i-0abc");
        assert!(backend()
            .get_metric_statistics(&failing, start, end)
            .await
            .is_err());

        let unknown = MetricQuery::new("AWS/EC2", "NetworkOut", Statistic::Sum)
            .dimension("InstanceId", "i-0abc");
        assert!(backend()
            .get_metric_statistics(&unknown, start, end)
            .await
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        assert!(SnapshotBackend::load(file.path()).is_ok());
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = SnapshotBackend::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to read snapshot file"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SnapshotBackend::load(Path::new("/nonexistent/snapshot.json"));
        assert!(result.is_err());
    }
}
