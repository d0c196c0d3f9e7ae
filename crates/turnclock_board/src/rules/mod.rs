//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Rules are kept apart from board storage
//! so the engine and the session can both evaluate a position without
//! owning it.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, Win};

use super::{Board, Player, WinLine};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of scanning the board for a terminal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Completion {
    /// No line complete and at least one empty cell.
    InProgress,
    /// A player holds all three cells of `line`.
    Win {
        /// The winning player.
        player: Player,
        /// The first completed line in scan order.
        line: WinLine,
    },
    /// Board full with no completed line.
    Draw,
}

impl Completion {
    /// Returns true for a win or draw.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Completion::InProgress)
    }
}

/// Evaluates the board: winner first, then draw.
#[instrument(skip(board))]
pub fn check_completion(board: &Board) -> Completion {
    if let Some(Win { player, line }) = check_winner(board) {
        Completion::Win { player, line }
    } else if is_full(board) {
        Completion::Draw
    } else {
        Completion::InProgress
    }
}
