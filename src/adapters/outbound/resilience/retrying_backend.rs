use crate::ports::outbound::{InventoryBackend, MetricsBackend, ObjectSummary, PublicAccessBlock};
use crate::resource_analysis::domain::{Datapoint, MetricQuery, ResourceDescriptor, ResourceKind};
use crate::shared::retry::retry_with_backoff;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Default number of attempts per backend call
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// RetryingBackend wraps an inventory or metrics backend and retries failed calls.
///
/// This adapter implements the decorator pattern: each call is attempted up
/// to `max_retries` times with linear backoff, and only the last error is
/// returned. Callers' own fallbacks (defaults, dropping the resource) apply
/// after the retries are exhausted.
#[derive(Debug, Clone)]
pub struct RetryingBackend<B> {
    inner: B,
    max_retries: u32,
}

impl<B> RetryingBackend<B> {
    /// Creates a new retrying backend wrapping the given inner backend
    pub fn new(inner: B, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries: max_retries.max(1),
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

#[async_trait]
impl<B: InventoryBackend> InventoryBackend for RetryingBackend<B> {
    async fn list_resources(&self, kind: ResourceKind) -> Result<Vec<ResourceDescriptor>> {
        retry_with_backoff(self.max_retries, || self.inner.list_resources(kind)).await
    }

    async fn bucket_region(&self, bucket: &str) -> Result<Option<String>> {
        retry_with_backoff(self.max_retries, || self.inner.bucket_region(bucket)).await
    }

    async fn bucket_versioning(&self, bucket: &str) -> Result<Option<String>> {
        retry_with_backoff(self.max_retries, || self.inner.bucket_versioning(bucket)).await
    }

    async fn public_access_block(&self, bucket: &str) -> Result<PublicAccessBlock> {
        retry_with_backoff(self.max_retries, || self.inner.public_access_block(bucket)).await
    }

    async fn list_objects(&self, bucket: &str, max_keys: usize) -> Result<Vec<ObjectSummary>> {
        retry_with_backoff(self.max_retries, || {
            self.inner.list_objects(bucket, max_keys)
        })
        .await
    }
}

#[async_trait]
impl<B: MetricsBackend> MetricsBackend for RetryingBackend<B> {
    async fn get_metric_statistics(
        &self,
        query: &MetricQuery,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Datapoint>> {
        retry_with_backoff(self.max_retries, || {
            self.inner.get_metric_statistics(query, start, end)
        })
        .await
    }
}
