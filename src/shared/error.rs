use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow schedulers to distinguish a run that could not list
/// its resources from a misconfigured invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every requested kind was enumerated (individual resources may still have been dropped)
    Success = 0,
    /// At least one requested kind failed at the enumeration step
    RunFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (config file, snapshot file, store initialisation, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::RunFailed => write!(f, "Run Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Failure taxonomy of the analysis pipeline.
///
/// Only `EnumerationFailed` ever reaches a run's result. The metric,
/// supplementary-lookup, processing and write variants are raised by
/// collaborators and absorbed at the boundary that called them.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Metric {metric} unavailable for {resource_id}: {details}")]
    MetricUnavailable {
        metric: String,
        resource_id: String,
        details: String,
    },

    #[error("{lookup} lookup failed for bucket {bucket}: {details}")]
    SupplementaryLookupFailed {
        lookup: String,
        bucket: String,
        details: String,
    },

    #[error("Failed to process resource {resource_id}: {details}")]
    ResourceProcessingFailed { resource_id: String, details: String },

    #[error("Resource {resource_id} is missing required attribute '{attribute}'")]
    MissingAttribute {
        resource_id: String,
        attribute: String,
    },

    #[error("Failed to list {kind} resources: {details}")]
    EnumerationFailed { kind: String, details: String },

    #[error("Failed to write finding {id} to table {table}: {details}")]
    WriteFailed {
        id: String,
        table: String,
        details: String,
    },

    #[error("Failed to read snapshot file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and contains a valid JSON snapshot")]
    SnapshotReadError { path: PathBuf, details: String },

    /// Validation error for value objects and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },
}
