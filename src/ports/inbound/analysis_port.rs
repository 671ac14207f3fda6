use crate::application::dto::{RunReport, RunRequest};
use async_trait::async_trait;

/// AnalysisPort - Inbound port for the "run for kind K" entry point
///
/// This is the surface external drivers (the CLI, a scheduler) call. A run
/// always produces a report; enumeration failures are reported as a failure
/// status rather than returned as an error.
#[async_trait(?Send)]
pub trait AnalysisPort {
    /// Analyses every resource of `request.kind` and persists the findings
    async fn run(&self, request: RunRequest) -> RunReport;
}
