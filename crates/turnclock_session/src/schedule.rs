//! Single-shot delayed continuations advanced by session ticks.
//!
//! There is one slot for a pending lifecycle transition and one for a pending
//! opponent move. Scheduling into an occupied slot replaces its timer. Fired
//! continuations carry the epoch they were scheduled under; the session drops
//! any whose epoch no longer matches.

use super::state::Trigger;
use std::time::Duration;
use turnclock_board::Player;

/// Work to run once a timer elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Feed a trigger into the lifecycle table.
    Lifecycle(Trigger),
    /// Let the automated player move.
    OpponentMove {
        /// Player the move is for.
        player: Player,
        /// Number of moves already in the game when scheduled.
        moves_played: usize,
    },
}

/// A continuation whose delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    /// Session epoch at scheduling time.
    pub epoch: u64,
    /// What to run.
    pub continuation: Continuation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    remaining: Duration,
    epoch: u64,
    continuation: Continuation,
}

impl Timer {
    fn advance(&mut self, delta: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(delta);
        self.remaining.is_zero()
    }

    fn fired(self) -> Fired {
        Fired {
            epoch: self.epoch,
            continuation: self.continuation,
        }
    }
}

/// Pending continuations for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    lifecycle: Option<Timer>,
    opponent: Option<Timer>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a lifecycle trigger. Returns true if a pending one was superseded.
    pub fn schedule_lifecycle(&mut self, delay: Duration, epoch: u64, trigger: Trigger) -> bool {
        self.lifecycle
            .replace(Timer {
                remaining: delay,
                epoch,
                continuation: Continuation::Lifecycle(trigger),
            })
            .is_some()
    }

    /// Schedules an opponent move. Returns true if a pending one was superseded.
    pub fn schedule_opponent(
        &mut self,
        delay: Duration,
        epoch: u64,
        player: Player,
        moves_played: usize,
    ) -> bool {
        self.opponent
            .replace(Timer {
                remaining: delay,
                epoch,
                continuation: Continuation::OpponentMove {
                    player,
                    moves_played,
                },
            })
            .is_some()
    }

    /// Drops a pending opponent move.
    pub fn cancel_opponent(&mut self) -> bool {
        self.opponent.take().is_some()
    }

    /// True if an opponent move is pending under `epoch`.
    pub fn opponent_pending(&self, epoch: u64) -> bool {
        self.opponent.is_some_and(|t| t.epoch == epoch)
    }

    /// True if a lifecycle trigger is pending under `epoch`.
    pub fn lifecycle_pending(&self, epoch: u64) -> bool {
        self.lifecycle.is_some_and(|t| t.epoch == epoch)
    }

    /// Time until the pending lifecycle trigger fires.
    pub fn lifecycle_remaining(&self) -> Option<Duration> {
        self.lifecycle.map(|t| t.remaining)
    }

    /// Advances every timer and removes the ones that are due.
    ///
    /// Lifecycle continuations come before opponent moves.
    pub fn advance(&mut self, delta: Duration) -> Vec<Fired> {
        let mut fired = Vec::new();
        for slot in [&mut self.lifecycle, &mut self.opponent] {
            let due = slot.as_mut().is_some_and(|timer| timer.advance(delta));
            if due && let Some(timer) = slot.take() {
                fired.push(timer.fired());
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let mut schedule = Schedule::new();
        schedule.schedule_lifecycle(Duration::from_secs(3), 1, Trigger::DwellElapsed);

        assert!(schedule.advance(Duration::from_millis(2900)).is_empty());
        let fired = schedule.advance(Duration::from_millis(100));
        assert_eq!(
            fired,
            vec![Fired {
                epoch: 1,
                continuation: Continuation::Lifecycle(Trigger::DwellElapsed)
            }]
        );
        assert!(schedule.advance(Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_rescheduling_supersedes() {
        let mut schedule = Schedule::new();
        assert!(!schedule.schedule_lifecycle(Duration::from_secs(1), 1, Trigger::DwellElapsed));
        assert!(schedule.schedule_lifecycle(Duration::from_secs(5), 2, Trigger::DwellElapsed));

        assert!(schedule.advance(Duration::from_secs(1)).is_empty());
        assert!(schedule.lifecycle_pending(2));
        assert!(!schedule.lifecycle_pending(1));
        assert_eq!(schedule.lifecycle_remaining(), Some(Duration::from_secs(4)));
    }

    #[test]
    fn test_slots_are_independent() {
        let mut schedule = Schedule::new();
        schedule.schedule_lifecycle(Duration::from_secs(3), 4, Trigger::DwellElapsed);
        schedule.schedule_opponent(Duration::from_secs(1), 4, Player::Two, 1);

        let fired = schedule.advance(Duration::from_secs(1));
        assert_eq!(fired.len(), 1);
        assert!(matches!(
            fired[0].continuation,
            Continuation::OpponentMove {
                player: Player::Two,
                moves_played: 1
            }
        ));
        assert!(schedule.lifecycle_pending(4));
        assert!(!schedule.cancel_opponent());
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut schedule = Schedule::new();
        schedule.schedule_opponent(Duration::ZERO, 0, Player::One, 0);
        assert!(schedule.opponent_pending(0));
        assert_eq!(schedule.advance(Duration::ZERO).len(), 1);
    }
}
