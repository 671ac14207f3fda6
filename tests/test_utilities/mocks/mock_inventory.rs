use async_trait::async_trait;
use cost_optimizer::prelude::*;
use std::collections::{HashMap, HashSet};

/// Mock InventoryBackend serving canned descriptors per kind
///
/// Bucket lookups succeed with fixed answers unless the bucket is listed in
/// `failing_lookups`, in which case every lookup for it fails.
#[derive(Default, Clone)]
pub struct MockInventory {
    pub resources: HashMap<ResourceKind, Vec<ResourceDescriptor>>,
    pub failing_kinds: HashSet<ResourceKind>,
    pub failing_lookups: HashSet<String>,
    pub public_access: PublicAccessBlock,
}

impl MockInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resources(mut self, kind: ResourceKind, resources: Vec<ResourceDescriptor>) -> Self {
        self.resources.insert(kind, resources);
        self
    }

    pub fn with_listing_failure(mut self, kind: ResourceKind) -> Self {
        self.failing_kinds.insert(kind);
        self
    }

    pub fn with_lookup_failures(mut self, bucket: &str) -> Self {
        self.failing_lookups.insert(bucket.to_string());
        self
    }

    pub fn with_public_access(mut self, block: PublicAccessBlock) -> Self {
        self.public_access = block;
        self
    }

    fn check(&self, bucket: &str) -> Result<()> {
        if self.failing_lookups.contains(bucket) {
            anyhow::bail!("AccessDenied for bucket {}", bucket);
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryBackend for MockInventory {
    async fn list_resources(&self, kind: ResourceKind) -> Result<Vec<ResourceDescriptor>> {
        if self.failing_kinds.contains(&kind) {
            anyhow::bail!("Mock listing failure for {}", kind);
        }
        Ok(self.resources.get(&kind).cloned().unwrap_or_default())
    }

    async fn bucket_region(&self, bucket: &str) -> Result<Option<String>> {
        self.check(bucket)?;
        Ok(Some("ap-northeast-1".to_string()))
    }

    async fn bucket_versioning(&self, bucket: &str) -> Result<Option<String>> {
        self.check(bucket)?;
        Ok(Some("Enabled".to_string()))
    }

    async fn public_access_block(&self, bucket: &str) -> Result<PublicAccessBlock> {
        self.check(bucket)?;
        Ok(self.public_access)
    }

    async fn list_objects(&self, bucket: &str, _max_keys: usize) -> Result<Vec<ObjectSummary>> {
        self.check(bucket)?;
        Ok(vec![
            ObjectSummary {
                storage_class: Some("STANDARD_IA".to_string()),
            },
            ObjectSummary {
                storage_class: None,
            },
        ])
    }
}
