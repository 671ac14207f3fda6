//! cost-optimizer - cloud resource analyzers producing cost findings
//!
//! This library scans one kind of cloud resource at a time (compute instances,
//! block volumes, managed databases, object-storage buckets), aggregates a
//! trailing metric window per resource and upserts one finding per reportable
//! resource into a findings store. It follows hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`resource_analysis`): Resource model, filters, per-kind profiles
//! - **Application Layer** (`application`): The batch runner and its DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Error types, `Result` alias, retry helper
//!
//! # Example
//!
//! ```no_run
//! use cost_optimizer::prelude::*;
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let backend = RetryingBackend::new(SnapshotBackend::load(Path::new("snapshot.json"))?, 3);
//! let store = InMemoryFindingStore::default();
//!
//! // Create use case
//! let use_case = AnalyzeResourcesUseCase::new(
//!     backend.clone(),
//!     backend,
//!     store.clone(),
//!     StderrProgressReporter::new(),
//!     SystemClock::new(),
//! );
//!
//! // Execute
//! let report = use_case.execute(RunRequest::new(ResourceKind::Volume)).await;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod resource_analysis;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::clock::SystemClock;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::persistence::{InMemoryFindingStore, JsonFileFindingStore};
    pub use crate::adapters::outbound::resilience::RetryingBackend;
    pub use crate::adapters::outbound::snapshot::SnapshotBackend;
    pub use crate::application::dto::{RunReport, RunRequest, RunStatus};
    pub use crate::application::use_cases::AnalyzeResourcesUseCase;
    pub use crate::ports::inbound::AnalysisPort;
    pub use crate::ports::outbound::{
        Clock, FindingStore, InventoryBackend, MetricsBackend, ObjectSummary, ProgressReporter,
        PublicAccessBlock,
    };
    pub use crate::resource_analysis::domain::{
        Datapoint, Finding, MetricQuery, ResourceDescriptor, ResourceId, ResourceKind,
        Statistic,
    };
    pub use crate::resource_analysis::profiles::{profile_for, KindProfile};
    pub use crate::shared::Result;
}
