/// Resilience decorators for backend ports
mod retrying_backend;

pub use retrying_backend::{RetryingBackend, DEFAULT_MAX_RETRIES};
