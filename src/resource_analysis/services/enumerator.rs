use crate::ports::outbound::InventoryBackend;
use crate::resource_analysis::domain::{attr, AttributeValue, ResourceDescriptor, ResourceKind};
use crate::shared::error::AnalyzerError;
use crate::shared::Result;
use std::collections::BTreeMap;
use tracing::warn;

/// Upper bound on objects sampled for the storage-class histogram
pub const MAX_SAMPLED_OBJECTS: usize = 1000;

/// Region reported when a bucket has no location constraint
pub const DEFAULT_BUCKET_REGION: &str = "us-east-1";

/// Region reported when the location lookup fails
pub const UNKNOWN_REGION: &str = "unknown";

/// Storage class assumed for objects that do not report one
pub const DEFAULT_STORAGE_CLASS: &str = "STANDARD";

/// ResourceEnumerator - lists resources of one kind and completes their attributes
///
/// `list` is the single inventory call per kind and its failure is returned
/// to the caller. `describe` runs the per-resource supplementary lookups
/// (buckets only); each lookup that fails is logged and replaced by its
/// conservative default, so `describe` itself cannot fail.
pub struct ResourceEnumerator<'a, I: InventoryBackend> {
    inventory: &'a I,
}

impl<'a, I: InventoryBackend> ResourceEnumerator<'a, I> {
    pub fn new(inventory: &'a I) -> Self {
        Self { inventory }
    }

    /// Lists every resource of `kind`
    ///
    /// # Errors
    /// Propagates the inventory listing failure unchanged.
    pub async fn list(&self, kind: ResourceKind) -> Result<Vec<ResourceDescriptor>> {
        self.inventory.list_resources(kind).await
    }

    /// Adds supplementary attributes to a listed resource
    pub async fn describe(&self, descriptor: ResourceDescriptor) -> ResourceDescriptor {
        match descriptor.kind() {
            ResourceKind::Bucket => self.describe_bucket(descriptor).await,
            _ => descriptor,
        }
    }

    async fn describe_bucket(&self, descriptor: ResourceDescriptor) -> ResourceDescriptor {
        let bucket = descriptor.id().to_string();

        let region = self.region(&bucket).await;
        let versioning_enabled = self.versioning_enabled(&bucket).await;
        let is_public = self.is_public(&bucket).await;
        let storage_classes = self.storage_class_breakdown(&bucket).await;

        descriptor
            .with_attribute(attr::REGION, AttributeValue::Text(region))
            .with_attribute(
                attr::VERSIONING_ENABLED,
                AttributeValue::Boolean(versioning_enabled),
            )
            .with_attribute(attr::IS_PUBLIC, AttributeValue::Boolean(is_public))
            .with_attribute(
                attr::STORAGE_CLASSES,
                AttributeValue::Counts(storage_classes),
            )
    }

    async fn region(&self, bucket: &str) -> String {
        match self.inventory.bucket_region(bucket).await {
            Ok(Some(constraint)) if !constraint.is_empty() => constraint,
            Ok(_) => DEFAULT_BUCKET_REGION.to_string(),
            Err(e) => {
                warn!(error = %lookup_failed("location", bucket, e), "Error getting bucket location");
                UNKNOWN_REGION.to_string()
            }
        }
    }

    async fn versioning_enabled(&self, bucket: &str) -> bool {
        match self.inventory.bucket_versioning(bucket).await {
            Ok(status) => status.as_deref() == Some("Enabled"),
            Err(e) => {
                warn!(error = %lookup_failed("versioning", bucket, e), "Error checking bucket versioning");
                false
            }
        }
    }

    /// A bucket is private only when every public-access block is on.
    /// No configuration, or a failed lookup, counts as public.
    async fn is_public(&self, bucket: &str) -> bool {
        match self.inventory.public_access_block(bucket).await {
            Ok(block) => !block.blocks_all(),
            Err(e) => {
                warn!(error = %lookup_failed("public-access", bucket, e), "Error checking public access, assuming public");
                true
            }
        }
    }

    /// Histogram over the first `MAX_SAMPLED_OBJECTS` objects, not the whole bucket
    async fn storage_class_breakdown(&self, bucket: &str) -> BTreeMap<String, u64> {
        let mut histogram = BTreeMap::new();

        match self
            .inventory
            .list_objects(bucket, MAX_SAMPLED_OBJECTS)
            .await
        {
            Ok(objects) => {
                for object in objects.iter().take(MAX_SAMPLED_OBJECTS) {
                    let class = object
                        .storage_class
                        .clone()
                        .unwrap_or_else(|| DEFAULT_STORAGE_CLASS.to_string());
                    *histogram.entry(class).or_insert(0) += 1;
                }
            }
            Err(e) => {
                warn!(error = %lookup_failed("object listing", bucket, e), "Error getting storage classes");
            }
        }

        histogram
    }
}

fn lookup_failed(lookup: &str, bucket: &str, cause: anyhow::Error) -> AnalyzerError {
    AnalyzerError::SupplementaryLookupFailed {
        lookup: lookup.to_string(),
        bucket: bucket.to_string(),
        details: cause.to_string(),
    }
}
