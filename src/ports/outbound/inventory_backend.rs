use crate::resource_analysis::domain::{ResourceDescriptor, ResourceKind};
use crate::shared::Result;
use async_trait::async_trait;

/// Public-access-block settings of a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublicAccessBlock {
    pub block_public_acls: bool,
    pub ignore_public_acls: bool,
    pub block_public_policy: bool,
    pub restrict_public_buckets: bool,
}

impl PublicAccessBlock {
    /// True only when all four settings are on
    pub fn blocks_all(&self) -> bool {
        self.block_public_acls
            && self.ignore_public_acls
            && self.block_public_policy
            && self.restrict_public_buckets
    }
}

/// One entry of a bucket object listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    /// Absent for objects in the default class
    pub storage_class: Option<String>,
}

/// InventoryBackend port for listing resources
///
/// This port abstracts the provider inventory APIs. Implementations map the
/// provider's raw shapes onto `ResourceDescriptor`s, one listing call per kind.
/// The bucket lookups are supplementary per-bucket calls; callers treat their
/// failures as soft and substitute defaults.
#[async_trait]
pub trait InventoryBackend: Send + Sync {
    /// Lists every resource of one kind
    ///
    /// # Errors
    /// Returns an error when the listing itself fails; for a run this is fatal.
    async fn list_resources(&self, kind: ResourceKind) -> Result<Vec<ResourceDescriptor>>;

    /// Returns the bucket's location constraint (`None` for the default region)
    async fn bucket_region(&self, bucket: &str) -> Result<Option<String>>;

    /// Returns the bucket's versioning status string (e.g. `Enabled`, `Suspended`)
    async fn bucket_versioning(&self, bucket: &str) -> Result<Option<String>>;

    /// Returns the bucket's public-access-block configuration
    ///
    /// # Errors
    /// Returns an error when the lookup fails or no configuration exists.
    async fn public_access_block(&self, bucket: &str) -> Result<PublicAccessBlock>;

    /// Lists at most `max_keys` objects from the start of the bucket
    async fn list_objects(&self, bucket: &str, max_keys: usize) -> Result<Vec<ObjectSummary>>;
}
