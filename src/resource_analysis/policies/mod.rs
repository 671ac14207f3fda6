pub mod report_filter;

pub use report_filter::{FilterDecision, ReportFilter};
