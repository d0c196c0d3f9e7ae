//! Lifecycle states and the transition table.
//!
//! Every `(state, trigger)` pair is spelled out in [`resolve`], so adding a
//! state or trigger fails to compile until the table covers it.

use serde::{Deserialize, Serialize};
use turnclock_board::{Completion, Player, WinLine};

/// High-level session lifecycle state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum SessionState {
    /// Before setup. Never re-entered.
    #[default]
    Initial,
    /// Waiting for a start request. Board cleared, clock at max.
    Idle,
    /// Game in progress, clock running.
    Active,
    /// Outcome reached, clock stopped, return to idle pending.
    Finished,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A player completed a line.
    Win {
        /// The winning player.
        player: Player,
        /// The completed line.
        line: WinLine,
    },
    /// Board filled without a line.
    Draw,
    /// Ended on request before a result.
    Ended,
}

impl Outcome {
    /// Winner, or `None` for a draw or forced end.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win { player, .. } => Some(*player),
            Outcome::Draw | Outcome::Ended => None,
        }
    }

    /// Line to highlight, if any.
    pub fn line(&self) -> Option<WinLine> {
        match self {
            Outcome::Win { line, .. } => Some(*line),
            Outcome::Draw | Outcome::Ended => None,
        }
    }

    /// Converts a terminal board result. `InProgress` has no outcome.
    pub fn from_completion(completion: Completion) -> Option<Self> {
        match completion {
            Completion::Win { player, line } => Some(Outcome::Win { player, line }),
            Completion::Draw => Some(Outcome::Draw),
            Completion::InProgress => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win { player, line } => write!(f, "{player} wins ({line})"),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::Ended => write!(f, "Ended"),
        }
    }
}

/// Something that may move the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// Program startup.
    Startup,
    /// The start-game input.
    StartRequested,
    /// The board reached a win or draw.
    OutcomeReached(Outcome),
    /// The force-finish input.
    EndRequested,
    /// The finished dwell delay ran out.
    DwellElapsed,
    /// The abort/reset input.
    ResetRequested,
}

/// A legal lifecycle edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    /// Initial → Idle.
    Boot,
    /// Idle → Active.
    Begin,
    /// Active → Finished.
    Conclude(Outcome),
    /// Finished → Idle, swapping the opening player.
    Recycle,
    /// Active → Idle without a result.
    Abort,
}

impl Transition {
    /// State the transition leaves.
    pub fn source(self) -> SessionState {
        match self {
            Transition::Boot => SessionState::Initial,
            Transition::Begin => SessionState::Idle,
            Transition::Conclude(_) | Transition::Abort => SessionState::Active,
            Transition::Recycle => SessionState::Finished,
        }
    }

    /// State the transition enters.
    pub fn target(self) -> SessionState {
        match self {
            Transition::Boot | Transition::Recycle | Transition::Abort => SessionState::Idle,
            Transition::Begin => SessionState::Active,
            Transition::Conclude(_) => SessionState::Finished,
        }
    }
}

/// Looks up the edge taken from `state` on `trigger`, or `None` for a no-op.
pub fn resolve(state: SessionState, trigger: Trigger) -> Option<Transition> {
    use SessionState::*;
    use Trigger::*;

    match (state, trigger) {
        (Initial, Startup) => Some(Transition::Boot),
        (
            Initial,
            StartRequested | OutcomeReached(_) | EndRequested | DwellElapsed | ResetRequested,
        ) => None,

        (Idle, StartRequested) => Some(Transition::Begin),
        (Idle, Startup | OutcomeReached(_) | EndRequested | DwellElapsed | ResetRequested) => None,

        (Active, OutcomeReached(outcome)) => Some(Transition::Conclude(outcome)),
        (Active, EndRequested) => Some(Transition::Conclude(Outcome::Ended)),
        (Active, ResetRequested) => Some(Transition::Abort),
        (Active, Startup | StartRequested | DwellElapsed) => None,

        (Finished, DwellElapsed | ResetRequested) => Some(Transition::Recycle),
        (Finished, Startup | StartRequested | OutcomeReached(_) | EndRequested) => None,
    }
}
