/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod clock;
pub mod console;
pub mod persistence;
pub mod resilience;
pub mod snapshot;
