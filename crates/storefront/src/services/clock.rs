//! Millisecond clock used for generated keys.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Wall-clock milliseconds that never repeat or go backwards within a
/// process.
///
/// Cart line ids and order numbers are derived from the current time in
/// milliseconds; two actions in the same millisecond get consecutive
/// values instead of colliding.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: AtomicI64,
}

impl MonotonicClock {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Next timestamp: `max(now, previous + 1)`.
    pub fn now_millis(&self) -> i64 {
        self.next_after(Utc::now().timestamp_millis())
    }

    /// Next timestamp as a UTC date-time.
    pub fn now(&self) -> DateTime<Utc> {
        let millis = self.now_millis();
        DateTime::from_timestamp_millis(millis).unwrap_or_else(Utc::now)
    }

    fn next_after(&self, now: i64) -> i64 {
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }
}
