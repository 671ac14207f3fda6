/// ProgressReporter port for reporting progress during a run
///
/// This port abstracts user-facing progress output (e.g., to stderr) so it
/// never mixes with the JSON report written to stdout. Warnings and errors
/// go through `tracing` instead.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress through the resources of one kind
    ///
    /// # Arguments
    /// * `current` - Resources processed so far
    /// * `total` - Resources enumerated
    /// * `message` - Optional message to include (usually the resource id)
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let _ = (current, total, message);
    }

    /// Reports completion of a run
    fn report_completion(&self, message: &str);
}
