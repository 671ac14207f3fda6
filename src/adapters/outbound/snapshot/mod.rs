/// Snapshot adapters serving recorded provider state from a JSON file
pub mod model;
mod snapshot_backend;

pub use model::Snapshot;
pub use snapshot_backend::SnapshotBackend;
