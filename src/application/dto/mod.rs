/// Data Transfer Objects for application layer
///
/// DTOs carry a run's parameters in and its report out, keeping the
/// domain layer isolated from the CLI.
mod run_report;
mod run_request;

pub use run_report::{RunReport, RunStatus};
pub use run_request::{RunRequest, DEFAULT_CONCURRENCY};
