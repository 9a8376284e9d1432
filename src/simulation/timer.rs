//! Cancellable periodic trigger for a cooperative driver loop

use std::time::{Duration, Instant};

/// A periodic task armed at a fixed interval.
///
/// The timer never fires on its own: the driver polls it with the current
/// instant and performs one tick per successful [`PeriodicTimer::fire`].
/// Dropping the timer disarms it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTimer {
    period: Duration,
    next_due: Instant,
}

impl PeriodicTimer {
    /// Arm a timer whose first tick falls one period after `now`
    pub fn arm(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    /// Consume a due tick.
    ///
    /// The next tick is scheduled one period after `now`, so a late poll
    /// yields a single tick rather than a burst of missed ones.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.next_due = now + self.period;
        true
    }

    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}
