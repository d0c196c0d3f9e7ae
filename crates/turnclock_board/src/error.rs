//! Board-level error types.

use super::{Difficulty, Position};

/// Error that can occur when applying or selecting a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The cell at the position is already occupied.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] Position),

    /// Automated selection was asked to move on a full board.
    #[display("No legal move available")]
    NoLegalMoveAvailable,

    /// The difficulty tier has no move-selection policy.
    #[display("Move selection for difficulty {} is not implemented", _0)]
    DifficultyUnimplemented(#[error(not(source))] Difficulty),
}
