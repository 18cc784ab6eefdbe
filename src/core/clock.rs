//! Time sources for version and modification timestamps

use crate::core::types::Timestamp;
use chrono::{Duration, Utc};
use std::cell::Cell;

/// Source of wall-clock timestamps
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Real wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Deterministic clock that advances by a fixed step on every reading
///
/// Every call to `now` returns a strictly later instant than the previous
/// one, so rankings by modification time never tie.
#[derive(Debug)]
pub struct ManualClock {
    next: Cell<Timestamp>,
    step: Duration,
}

impl ManualClock {
    /// Clock starting at `start`, ticking one second per reading
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            next: Cell::new(start),
            step: Duration::seconds(1),
        }
    }

    /// Set the amount the clock advances per reading
    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    /// Skip the clock forward without taking a reading
    pub fn advance(&self, by: Duration) {
        self.next.set(self.next.get() + by);
    }

    /// Instant the next reading will return
    pub fn peek(&self) -> Timestamp {
        self.next.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_at(Timestamp::default())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        let now = self.next.get();
        self.next.set(now + self.step);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_strictly_increasing() {
        let clock = ManualClock::default();
        let first = clock.now();
        let second = clock.now();
        assert_eq!(second - first, Duration::seconds(1));
    }

    #[test]
    fn test_manual_clock_step_and_advance() {
        let clock = ManualClock::default().with_step(Duration::milliseconds(5));
        let first = clock.now();
        clock.advance(Duration::minutes(1));
        let second = clock.now();
        assert_eq!(second - first, Duration::minutes(1) + Duration::milliseconds(5));
        assert_eq!(clock.peek() - second, Duration::milliseconds(5));
    }
}
