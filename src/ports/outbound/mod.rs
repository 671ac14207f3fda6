/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (inventory, metrics, persistence, console).
pub mod clock;
pub mod finding_store;
pub mod inventory_backend;
pub mod metrics_backend;
pub mod progress_reporter;

pub use clock::Clock;
pub use finding_store::{FindingStore, DEFAULT_TABLE_NAME};
pub use inventory_backend::{InventoryBackend, ObjectSummary, PublicAccessBlock};
pub use metrics_backend::MetricsBackend;
pub use progress_reporter::ProgressReporter;
