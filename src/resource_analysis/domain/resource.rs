use crate::shared::error::AnalyzerError;
use crate::shared::Result;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Name used when a resource carries no `Name` tag
pub const DEFAULT_RESOURCE_NAME: &str = "N/A";

/// Maximum length for resource identifiers (bucket names top out at 63, ARNs are longer)
const MAX_RESOURCE_ID_LENGTH: usize = 255;

/// Category of infrastructure object scanned by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Compute,
    Volume,
    Database,
    Bucket,
}

impl ResourceKind {
    /// All kinds in the order a full scan runs them
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Compute,
        ResourceKind::Volume,
        ResourceKind::Database,
        ResourceKind::Bucket,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Compute => "compute",
            ResourceKind::Volume => "volume",
            ResourceKind::Database => "database",
            ResourceKind::Bucket => "bucket",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compute" | "ec2" => Ok(ResourceKind::Compute),
            "volume" | "ebs" => Ok(ResourceKind::Volume),
            "database" | "rds" => Ok(ResourceKind::Database),
            "bucket" | "s3" => Ok(ResourceKind::Bucket),
            _ => Err(format!(
                "Invalid resource kind: {}. Please specify 'compute', 'volume', 'database' or 'bucket'",
                s
            )),
        }
    }
}

/// NewType wrapper for a provider resource identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AnalyzerError::Validation {
                message: "Resource identifier cannot be empty".to_string(),
            }
            .into());
        }
        if id.len() > MAX_RESOURCE_ID_LENGTH {
            return Err(AnalyzerError::Validation {
                message: format!(
                    "Resource identifier is too long ({} bytes). Maximum allowed: {} bytes",
                    id.len(),
                    MAX_RESOURCE_ID_LENGTH
                ),
            }
            .into());
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A raw attribute value as extracted from the inventory backend
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Timestamp(DateTime<FixedOffset>),
    /// Nullable text, e.g. the instance a volume is attached to
    OptionalText(Option<String>),
    /// Label histogram, e.g. objects per storage class
    Counts(BTreeMap<String, u64>),
}

/// Attribute keys shared by the inventory adapters and the kind profiles
pub mod attr {
    pub const INSTANCE_TYPE: &str = "instance_type";
    pub const STATE: &str = "state";
    pub const LAUNCH_TIME: &str = "launch_time";

    pub const VOLUME_TYPE: &str = "volume_type";
    pub const SIZE_GB: &str = "size_gb";
    pub const CREATE_TIME: &str = "create_time";
    pub const ATTACHMENT_COUNT: &str = "attachment_count";
    pub const ATTACHED_TO: &str = "attached_to";
    pub const IOPS: &str = "iops";
    pub const THROUGHPUT: &str = "throughput";

    pub const INSTANCE_CLASS: &str = "instance_class";
    pub const ENGINE: &str = "engine";
    pub const STATUS: &str = "status";
    pub const MULTI_AZ: &str = "multi_az";
    pub const STORAGE_TYPE: &str = "storage_type";
    pub const ALLOCATED_STORAGE_GB: &str = "allocated_storage_gb";

    pub const CREATION_DATE: &str = "creation_date";
    pub const REGION: &str = "region";
    pub const VERSIONING_ENABLED: &str = "versioning_enabled";
    pub const IS_PUBLIC: &str = "is_public";
    pub const STORAGE_CLASSES: &str = "storage_classes";
}

/// ResourceDescriptor - one enumerated resource with its raw attributes
///
/// Immutable once fetched; the enumerator builds a new descriptor when it
/// needs to add supplementary attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDescriptor {
    id: ResourceId,
    kind: ResourceKind,
    name: Option<String>,
    attributes: BTreeMap<String, AttributeValue>,
}

impl ResourceDescriptor {
    pub fn new(id: ResourceId, kind: ResourceKind, name: Option<String>) -> Self {
        Self {
            id,
            kind,
            name,
            attributes: BTreeMap::new(),
        }
    }

    /// Returns the descriptor with one more attribute set
    pub fn with_attribute(mut self, key: &str, value: AttributeValue) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Tag-derived name, or "N/A" when the resource has none
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_RESOURCE_NAME)
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    fn missing(&self, key: &str) -> anyhow::Error {
        AnalyzerError::MissingAttribute {
            resource_id: self.id.to_string(),
            attribute: key.to_string(),
        }
        .into()
    }

    pub fn text(&self, key: &str) -> Result<&str> {
        match self.attributes.get(key) {
            Some(AttributeValue::Text(value)) => Ok(value),
            _ => Err(self.missing(key)),
        }
    }

    pub fn integer(&self, key: &str) -> Result<i64> {
        match self.attributes.get(key) {
            Some(AttributeValue::Integer(value)) => Ok(*value),
            _ => Err(self.missing(key)),
        }
    }

    /// Integer attribute that falls back to `default` when absent
    pub fn integer_or(&self, key: &str, default: i64) -> i64 {
        match self.attributes.get(key) {
            Some(AttributeValue::Integer(value)) => *value,
            _ => default,
        }
    }

    pub fn boolean(&self, key: &str) -> Result<bool> {
        match self.attributes.get(key) {
            Some(AttributeValue::Boolean(value)) => Ok(*value),
            _ => Err(self.missing(key)),
        }
    }

    pub fn timestamp(&self, key: &str) -> Result<DateTime<FixedOffset>> {
        match self.attributes.get(key) {
            Some(AttributeValue::Timestamp(value)) => Ok(*value),
            _ => Err(self.missing(key)),
        }
    }

    pub fn optional_text(&self, key: &str) -> Option<&str> {
        match self.attributes.get(key) {
            Some(AttributeValue::OptionalText(value)) => value.as_deref(),
            Some(AttributeValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    pub fn counts(&self, key: &str) -> Option<&BTreeMap<String, u64>> {
        match self.attributes.get(key) {
            Some(AttributeValue::Counts(value)) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ResourceDescriptor {
        ResourceDescriptor::new(
            ResourceId::new("vol-0abc").unwrap(),
            ResourceKind::Volume,
            None,
        )
        .with_attribute(attr::STATE, AttributeValue::Text("in-use".to_string()))
        .with_attribute(attr::SIZE_GB, AttributeValue::Integer(100))
    }

    #[test]
    fn test_resource_kind_from_str() {
        assert_eq!(
            ResourceKind::from_str("compute").unwrap(),
            ResourceKind::Compute
        );
        assert_eq!(ResourceKind::from_str("EBS").unwrap(), ResourceKind::Volume);
        assert_eq!(ResourceKind::from_str("rds").unwrap(), ResourceKind::Database);
        assert_eq!(ResourceKind::from_str("S3").unwrap(), ResourceKind::Bucket);
    }

    #[test]
    fn test_resource_kind_from_str_invalid() {
        let error = ResourceKind::from_str("lambda").unwrap_err();
        assert!(error.contains("Invalid resource kind"));
        assert!(error.contains("lambda"));
    }

    #[test]
    fn test_resource_id_rejects_empty() {
        assert!(ResourceId::new("").is_err());
        assert!(ResourceId::new("   ").is_err());
    }

    #[test]
    fn test_resource_id_rejects_too_long() {
        let result = ResourceId::new("a".repeat(256));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_name_defaults_to_not_available() {
        assert_eq!(descriptor().name(), "N/A");

        let named = ResourceDescriptor::new(
            ResourceId::new("i-1").unwrap(),
            ResourceKind::Compute,
            Some("web-1".to_string()),
        );
        assert_eq!(named.name(), "web-1");
    }

    #[test]
    fn test_typed_attribute_access() {
        let descriptor = descriptor();
        assert_eq!(descriptor.text(attr::STATE).unwrap(), "in-use");
        assert_eq!(descriptor.integer(attr::SIZE_GB).unwrap(), 100);
        assert_eq!(descriptor.integer_or(attr::IOPS, 0), 0);
    }

    #[test]
    fn test_wrong_type_reports_missing_attribute() {
        let descriptor = descriptor();
        let error = descriptor.integer(attr::STATE).unwrap_err();
        assert!(error
            .to_string()
            .contains("missing required attribute 'state'"));
    }

    #[test]
    fn test_optional_text_accepts_null() {
        let descriptor =
            descriptor().with_attribute(attr::ATTACHED_TO, AttributeValue::OptionalText(None));
        assert_eq!(descriptor.optional_text(attr::ATTACHED_TO), None);
    }
}
