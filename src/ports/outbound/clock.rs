use chrono::{DateTime, Utc};

/// Clock port supplying the wall-clock time used for metric windows,
/// resource ages and finding timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
