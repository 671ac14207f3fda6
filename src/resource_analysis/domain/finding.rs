use super::{ResourceId, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Kind-specific derived fields stored alongside a finding
pub type FindingMetadata = BTreeMap<String, Value>;

/// Persisted resource type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    #[serde(rename = "EC2")]
    Ec2,
    #[serde(rename = "EBS")]
    Ebs,
    #[serde(rename = "RDS")]
    Rds,
    #[serde(rename = "S3")]
    S3,
}

impl From<ResourceKind> for ResourceType {
    fn from(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Compute => ResourceType::Ec2,
            ResourceKind::Volume => ResourceType::Ebs,
            ResourceKind::Database => ResourceType::Rds,
            ResourceKind::Bucket => ResourceType::S3,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ResourceType::Ec2 => "EC2",
            ResourceType::Ebs => "EBS",
            ResourceType::Rds => "RDS",
            ResourceType::S3 => "S3",
        };
        write!(f, "{}", tag)
    }
}

/// Finding severity. Every analyzer currently reports `info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
}

/// Finding - the persisted report record for one reportable resource
///
/// `id` equals `resource_id` and is the store's primary key, so a later
/// pass replaces the earlier record for the same resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub resource_id: String,
    pub resource_type: ResourceType,
    pub issue: String,
    pub severity: Severity,
    pub details: String,
    pub recommendation: String,
    pub metadata: FindingMetadata,
    pub timestamp: DateTime<Utc>,
}

impl Finding {
    pub fn new(
        resource_id: &ResourceId,
        resource_type: ResourceType,
        issue: impl Into<String>,
        details: impl Into<String>,
        recommendation: impl Into<String>,
        metadata: FindingMetadata,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: resource_id.to_string(),
            resource_id: resource_id.to_string(),
            resource_type,
            issue: issue.into(),
            severity: Severity::Info,
            details: details.into(),
            recommendation: recommendation.into(),
            metadata,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_resource_type_from_kind() {
        assert_eq!(ResourceType::from(ResourceKind::Compute), ResourceType::Ec2);
        assert_eq!(ResourceType::from(ResourceKind::Volume), ResourceType::Ebs);
        assert_eq!(ResourceType::from(ResourceKind::Database), ResourceType::Rds);
        assert_eq!(ResourceType::from(ResourceKind::Bucket), ResourceType::S3);
    }

    #[test]
    fn test_finding_serializes_stable_field_names() {
        let mut metadata = FindingMetadata::new();
        metadata.insert("size_gb".to_string(), json!(1.5));
        let finding = Finding::new(
            &ResourceId::new("my-bucket").unwrap(),
            ResourceType::S3,
            "s3_bucket",
            "S3 Bucket: my-bucket",
            "Size: 1.50GB, Objects: 0",
            metadata,
            Utc.with_ymd_and_hms(2024, 5, 8, 0, 0, 0).unwrap(),
        );

        let value = serde_json::to_value(&finding).unwrap();
        assert_eq!(value["id"], "my-bucket");
        assert_eq!(value["resource_id"], "my-bucket");
        assert_eq!(value["resource_type"], "S3");
        assert_eq!(value["issue"], "s3_bucket");
        assert_eq!(value["severity"], "info");
        assert_eq!(value["metadata"]["size_gb"], 1.5);
        assert_eq!(value["timestamp"], "2024-05-08T00:00:00Z");
    }
}
