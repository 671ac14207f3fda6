use crate::resource_analysis::domain::ResourceKind;

/// Resources analysed one after another unless configured otherwise
pub const DEFAULT_CONCURRENCY: usize = 1;

/// RunRequest - one batch pass over a single resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRequest {
    /// Kind to enumerate and analyse
    pub kind: ResourceKind,
    /// Maximum number of resources processed at the same time
    pub concurrency: usize,
}

impl RunRequest {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Sets the worker bound; zero is raised to one
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}
