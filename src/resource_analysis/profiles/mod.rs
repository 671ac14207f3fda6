//! Per-kind analyzer profiles.
//!
//! The batch runner is one pipeline; what differs between compute instances,
//! volumes, databases and buckets lives in a `KindProfile`: the filter
//! predicate, the metric queries, the derived metadata and the summary strings.

mod bucket;
mod compute;
mod database;
mod volume;

pub use bucket::BucketProfile;
pub use compute::ComputeProfile;
pub use database::DatabaseProfile;
pub use volume::VolumeProfile;

use crate::resource_analysis::domain::{
    FindingMetadata, MetricQuery, MetricResult, ResourceDescriptor, ResourceKind,
};
use crate::resource_analysis::policies::FilterDecision;
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

/// A metric query tagged with the derived field it feeds
#[derive(Debug, Clone, PartialEq)]
pub struct NamedQuery {
    pub field: &'static str,
    pub query: MetricQuery,
}

impl NamedQuery {
    pub fn new(field: &'static str, query: MetricQuery) -> Self {
        Self { field, query }
    }
}

/// Aggregated metric values keyed by `NamedQuery::field`
#[derive(Debug, Clone, Default)]
pub struct MetricValues(HashMap<&'static str, MetricResult>);

impl MetricValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, result: MetricResult) {
        self.0.insert(field, result);
    }

    /// Value for `field`; queries that were never issued read as 0.0
    pub fn get(&self, field: &str) -> f64 {
        self.0
            .get(field)
            .copied()
            .unwrap_or(MetricResult::ZERO)
            .value()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// KindProfile - the per-kind configuration of the analysis pipeline
pub trait KindProfile: Send + Sync {
    fn kind(&self) -> ResourceKind;

    /// Fixed `issue` tag of every finding of this kind
    fn issue(&self) -> &'static str;

    /// Plural noun used in log lines, e.g. "EBS volumes"
    fn noun(&self) -> &'static str;

    /// Decides reportability from listed attributes, before any metric call
    fn filter(&self, descriptor: &ResourceDescriptor) -> Result<FilterDecision>;

    /// Metric queries to aggregate for a reportable resource
    fn metric_queries(&self, descriptor: &ResourceDescriptor) -> Vec<NamedQuery>;

    /// Computes the finding metadata
    fn derive(
        &self,
        descriptor: &ResourceDescriptor,
        metrics: &MetricValues,
        now: DateTime<Utc>,
    ) -> Result<FindingMetadata>;

    fn details(&self, descriptor: &ResourceDescriptor, metadata: &FindingMetadata) -> String;

    /// Recommendation text; may format raw metric values that `derive` stores rounded
    fn recommendation(
        &self,
        descriptor: &ResourceDescriptor,
        metadata: &FindingMetadata,
        metrics: &MetricValues,
    ) -> String;

    /// Summary message of a successful run
    fn run_message(&self, findings_count: usize) -> String;
}

static COMPUTE: ComputeProfile = ComputeProfile;
static VOLUME: VolumeProfile = VolumeProfile;
static DATABASE: DatabaseProfile = DatabaseProfile;
static BUCKET: BucketProfile = BucketProfile;

/// Returns the profile for `kind`
pub fn profile_for(kind: ResourceKind) -> &'static dyn KindProfile {
    match kind {
        ResourceKind::Compute => &COMPUTE,
        ResourceKind::Volume => &VOLUME,
        ResourceKind::Database => &DATABASE,
        ResourceKind::Bucket => &BUCKET,
    }
}

fn metadata_f64(metadata: &FindingMetadata, key: &str) -> f64 {
    metadata.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn metadata_i64(metadata: &FindingMetadata, key: &str) -> i64 {
    metadata.get(key).and_then(Value::as_i64).unwrap_or(0)
}

fn metadata_bool(metadata: &FindingMetadata, key: &str) -> bool {
    metadata.get(key).and_then(Value::as_bool).unwrap_or(false)
}
