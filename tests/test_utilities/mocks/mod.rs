/// Mock implementations for testing
mod mock_clock;
mod mock_finding_store;
mod mock_inventory;
mod mock_metrics_backend;
mod mock_progress_reporter;

pub use mock_clock::MockClock;
pub use mock_finding_store::MockFindingStore;
pub use mock_inventory::MockInventory;
pub use mock_metrics_backend::MockMetricsBackend;
pub use mock_progress_reporter::MockProgressReporter;
