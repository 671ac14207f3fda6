//! Serde model of a provider snapshot file.
//!
//! Shapes follow the provider's describe/list responses closely enough that
//! a snapshot can be produced by dumping those responses and renaming keys
//! to snake_case.

use crate::resource_analysis::domain::ResourceKind;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub instances: Vec<InstanceModel>,
    #[serde(default)]
    pub volumes: Vec<VolumeModel>,
    #[serde(default)]
    pub db_instances: Vec<DbInstanceModel>,
    #[serde(default)]
    pub buckets: Vec<BucketModel>,
    #[serde(default)]
    pub metrics: Vec<MetricSeriesModel>,
    /// Kinds whose listing call fails
    #[serde(default)]
    pub fail_listing: Vec<ResourceKind>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagModel {
    pub key: String,
    pub value: String,
}

/// Value of the `Name` tag, if any
pub fn name_tag(tags: &[TagModel]) -> Option<String> {
    tags.iter()
        .find(|tag| tag.key == "Name")
        .map(|tag| tag.value.clone())
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstanceModel {
    pub instance_id: String,
    pub instance_type: String,
    pub state: String,
    pub launch_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub tags: Vec<TagModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentModel {
    pub instance_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolumeModel {
    pub volume_id: String,
    pub volume_type: String,
    pub size: i64,
    pub state: String,
    pub create_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub attachments: Vec<AttachmentModel>,
    pub iops: Option<i64>,
    pub throughput: Option<i64>,
    #[serde(default)]
    pub tags: Vec<TagModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DbInstanceModel {
    pub db_instance_identifier: String,
    pub db_instance_class: String,
    pub engine: String,
    pub db_instance_status: String,
    pub multi_az: bool,
    pub storage_type: String,
    pub allocated_storage: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationModel {
    /// `None` or empty for the default region
    pub location_constraint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersioningModel {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PublicAccessBlockModel {
    pub block_public_acls: bool,
    pub ignore_public_acls: bool,
    pub block_public_policy: bool,
    pub restrict_public_buckets: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectModel {
    pub storage_class: Option<String>,
}

/// A bucket and its per-bucket lookups; an absent lookup fails when queried
#[derive(Debug, Clone, Deserialize)]
pub struct BucketModel {
    pub name: String,
    pub creation_date: DateTime<FixedOffset>,
    pub location: Option<LocationModel>,
    pub versioning: Option<VersioningModel>,
    pub public_access_block: Option<PublicAccessBlockModel>,
    pub objects: Option<Vec<ObjectModel>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DimensionModel {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatapointModel {
    pub timestamp: DateTime<Utc>,
    pub sum: Option<f64>,
    pub average: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricSeriesModel {
    pub namespace: String,
    pub metric_name: String,
    #[serde(default)]
    pub dimensions: Vec<DimensionModel>,
    #[serde(default)]
    pub datapoints: Vec<DatapointModel>,
    /// Makes every query for this series fail
    #[serde(default)]
    pub fail: bool,
}
