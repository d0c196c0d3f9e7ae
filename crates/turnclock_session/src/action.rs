//! Moves recorded during a game.

use derive_new::new;
use serde::{Deserialize, Serialize};
use turnclock_board::{Player, Position};

/// Where a move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum MoveKind {
    /// A human clicked the cell.
    Placed,
    /// Played for a player whose turn clock ran out.
    Forfeit,
    /// Played by the automated opponent.
    Automated,
}

/// A player's mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the mark went.
    pub position: Position,
    /// How the move was chosen.
    pub kind: MoveKind,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.player, self.position, self.kind)
    }
}
