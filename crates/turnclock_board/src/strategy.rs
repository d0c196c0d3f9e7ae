//! Move selection for the automated player.

use super::{Board, MoveError, Player, Position};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Strength of the automated opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random legal move.
    #[default]
    Easy,
    /// Reserved tier with no policy yet.
    Difficult,
    /// Reserved tier with no policy yet.
    Legendary,
}

impl Difficulty {
    /// Whether a move-selection policy exists for this tier.
    pub fn is_implemented(self) -> bool {
        matches!(self, Difficulty::Easy)
    }
}

/// Picks a move for `player` on `board`.
///
/// # Errors
///
/// - [`MoveError::NoLegalMoveAvailable`] when the board is full.
/// - [`MoveError::DifficultyUnimplemented`] for tiers without a policy.
#[instrument(skip(board, rng))]
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    player: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Position, MoveError> {
    let candidates = board.legal_moves();
    if candidates.is_empty() {
        return Err(MoveError::NoLegalMoveAvailable);
    }

    match difficulty {
        Difficulty::Easy => {
            let choice = *candidates
                .choose(rng)
                .ok_or(MoveError::NoLegalMoveAvailable)?;
            debug!(%player, position = %choice, options = candidates.len(), "Selected random move");
            Ok(choice)
        }
        Difficulty::Difficult | Difficulty::Legendary => {
            Err(MoveError::DifficultyUnimplemented(difficulty))
        }
    }
}
