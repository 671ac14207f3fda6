pub mod finding;
pub mod metric;
pub mod resource;

pub use finding::{Finding, FindingMetadata, ResourceType, Severity};
pub use metric::{Datapoint, MetricQuery, MetricResult, Statistic, PERIOD_SECONDS, WINDOW_DAYS};
pub use resource::{
    attr, AttributeValue, ResourceDescriptor, ResourceId, ResourceKind, DEFAULT_RESOURCE_NAME,
};
