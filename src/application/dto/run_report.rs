use crate::resource_analysis::domain::{Finding, ResourceKind};
use serde::Serialize;
use uuid::Uuid;

/// Overall outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failure,
}

/// RunReport - result of one run for one resource kind
///
/// A successful run always carries a count, a message and the findings,
/// even when resources were dropped along the way. A failed run (the kind
/// could not be listed) carries only the error.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub kind: ResourceKind,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<Vec<Finding>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Resources the kind's filter excluded
    pub skipped_count: usize,
    /// Resources dropped because their processing failed
    pub failed_count: usize,
    /// Findings whose write to the store failed
    pub write_failures: usize,
}

impl RunReport {
    pub fn success(
        run_id: Uuid,
        kind: ResourceKind,
        message: String,
        findings: Vec<Finding>,
    ) -> Self {
        Self {
            run_id,
            kind,
            status: RunStatus::Success,
            findings_count: Some(findings.len()),
            message: Some(message),
            findings: Some(findings),
            error: None,
            skipped_count: 0,
            failed_count: 0,
            write_failures: 0,
        }
    }

    pub fn failure(run_id: Uuid, kind: ResourceKind, error: String) -> Self {
        Self {
            run_id,
            kind,
            status: RunStatus::Failure,
            findings_count: None,
            message: None,
            findings: None,
            error: Some(error),
            skipped_count: 0,
            failed_count: 0,
            write_failures: 0,
        }
    }

    pub fn with_counters(mut self, skipped: usize, failed: usize, write_failures: usize) -> Self {
        self.skipped_count = skipped;
        self.failed_count = failed;
        self.write_failures = write_failures;
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }

    /// Findings of a successful run; empty for a failed one
    pub fn findings(&self) -> &[Finding] {
        self.findings.as_deref().unwrap_or_default()
    }
}
