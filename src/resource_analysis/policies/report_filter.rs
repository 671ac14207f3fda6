use crate::resource_analysis::domain::{attr, ResourceDescriptor};
use crate::shared::Result;

/// Lifecycle state of a compute instance that is reported
pub const RUNNING_STATE: &str = "running";

/// Database status that is reported
pub const AVAILABLE_STATUS: &str = "available";

/// Databases must allocate strictly more than this many GB to be reported
pub const MIN_DATABASE_STORAGE_GB: i64 = 10;

/// Outcome of a kind's filter predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
    Reportable,
    Skip { reason: String },
}

impl FilterDecision {
    pub fn is_reportable(&self) -> bool {
        matches!(self, FilterDecision::Reportable)
    }

    fn skip(reason: String) -> Self {
        FilterDecision::Skip { reason }
    }
}

/// ReportFilter - per-kind reportability rules
///
/// Evaluated on the listed attributes only, before any metric call is made.
pub struct ReportFilter;

impl ReportFilter {
    /// Compute instances are reported only while running
    pub fn compute(descriptor: &ResourceDescriptor) -> Result<FilterDecision> {
        let state = descriptor.text(attr::STATE)?;
        if state != RUNNING_STATE {
            return Ok(FilterDecision::skip(format!(
                "not running (status: {})",
                state
            )));
        }
        Ok(FilterDecision::Reportable)
    }

    /// Databases must be available and allocate more than 10 GB.
    /// The status check short-circuits the storage check.
    pub fn database(descriptor: &ResourceDescriptor) -> Result<FilterDecision> {
        let status = descriptor.text(attr::STATUS)?;
        if status != AVAILABLE_STATUS {
            return Ok(FilterDecision::skip(format!(
                "not running (status: {})",
                status
            )));
        }

        let allocated = descriptor.integer(attr::ALLOCATED_STORAGE_GB)?;
        if allocated <= MIN_DATABASE_STORAGE_GB {
            return Ok(FilterDecision::skip(format!(
                "storage too small ({}GB)",
                allocated
            )));
        }

        Ok(FilterDecision::Reportable)
    }

    /// Volumes and buckets are pure inventory reports
    pub fn always(_descriptor: &ResourceDescriptor) -> Result<FilterDecision> {
        Ok(FilterDecision::Reportable)
    }
}
