use chrono::{DateTime, TimeZone, Utc};
use cost_optimizer::prelude::*;

/// Mock Clock frozen at a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct MockClock(pub DateTime<Utc>);

impl MockClock {
    /// Midnight UTC on the given day of May 2024
    pub fn may(day: u32) -> Self {
        Self(Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap())
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
