//! Per-turn countdown clock.

use std::time::Duration;

/// Counts down one turn's time budget.
///
/// `remaining = max - elapsed`, saturating at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnClock {
    max: Duration,
    elapsed: Duration,
}

impl TurnClock {
    /// Creates a full clock.
    pub fn new(max: Duration) -> Self {
        Self {
            max,
            elapsed: Duration::ZERO,
        }
    }

    /// Adds `delta` and returns the time left.
    pub fn advance(&mut self, delta: Duration) -> Duration {
        self.elapsed = self.elapsed.saturating_add(delta);
        self.remaining()
    }

    /// Refills the clock.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Time left this turn.
    pub fn remaining(&self) -> Duration {
        self.max.saturating_sub(self.elapsed)
    }

    /// Time spent this turn.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Full turn budget.
    pub fn max(&self) -> Duration {
        self.max
    }

    /// True once the budget is used up.
    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.max
    }
}
