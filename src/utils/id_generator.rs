// Time-based id allocation for in-memory entities

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Issues ids derived from the current Unix time in milliseconds.
///
/// Ids are strictly increasing: two allocations within the same millisecond,
/// or after a clock step backwards, still yield distinct ascending ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an externally assigned id so later allocations stay above it
    pub fn observe(&self, id: i64) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }

    pub fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }
}
