//! Notifications for the presentation layer.

use super::action::Move;
use super::state::{Outcome, SessionState};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use turnclock_board::{Board, Player};

/// Something observers may want to redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    /// Lifecycle state changed.
    StateChanged(SessionState),
    /// The board changed (move applied or cleared).
    BoardChanged(Board),
    /// The turn passed to a player.
    TurnChanged(Player),
    /// Time left on the current turn.
    ClockChanged(Duration),
    /// A move was applied.
    MovePlayed(Move),
    /// A click was refused.
    MoveRejected {
        /// Index that was clicked.
        index: usize,
        /// Why it was refused.
        reason: String,
    },
    /// A game ended.
    GameFinished(Outcome),
}

/// Receives session notifications synchronously, in emission order.
pub trait SessionObserver {
    /// Handles one notification.
    fn notify(&mut self, notification: &Notification);
}

/// Records every notification.
impl SessionObserver for Vec<Notification> {
    fn notify(&mut self, notification: &Notification) {
        self.push(notification.clone());
    }
}

/// Discards notifications.
impl SessionObserver for () {
    fn notify(&mut self, _notification: &Notification) {}
}
