//! Time source for new todos

use std::cell::Cell;

use chrono::Utc;

/// Supplies the current time in milliseconds since the Unix epoch
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Deterministic clock that advances by `step` after every read
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<i64>,
    step: i64,
}

impl ManualClock {
    /// A clock frozen at `now`
    pub fn fixed(now: i64) -> Self {
        Self::stepping(now, 0)
    }

    /// A clock starting at `start` that moves forward by `step` per read
    pub fn stepping(start: i64, step: i64) -> Self {
        Self {
            now: Cell::new(start),
            step,
        }
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}
