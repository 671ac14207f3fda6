mod aggregator;
pub mod derived_fields;
mod enumerator;
mod finding_assembler;

pub use aggregator::MetricWindowAggregator;
pub use enumerator::{
    ResourceEnumerator, DEFAULT_BUCKET_REGION, DEFAULT_STORAGE_CLASS, MAX_SAMPLED_OBJECTS,
    UNKNOWN_REGION,
};
pub use finding_assembler::FindingAssembler;
