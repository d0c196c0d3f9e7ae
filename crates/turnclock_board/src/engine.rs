//! Board rule engine: the only mutation path for a [`Board`].

use super::rules::{self, Completion};
use super::strategy::{self, Difficulty};
use super::{Board, Cell, MoveError, Player, Position};
use rand::Rng;
use tracing::{debug, instrument, warn};

/// Owns a board and enforces the placement rules on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardEngine {
    board: Board,
}

impl BoardEngine {
    /// Creates an engine over an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Places `player` at `position` if the cell is empty.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::CellOccupied`] and leaves the board untouched if
    /// the cell already holds a mark.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, position: Position, player: Player) -> Result<(), MoveError> {
        if !self.board.is_empty(position) {
            warn!(%position, %player, "Cell is already occupied");
            return Err(MoveError::CellOccupied(position));
        }

        #[cfg(debug_assertions)]
        let before = self.board.clone();

        self.board.set(position, Cell::Occupied(player));
        debug!(%position, %player, "Move applied");

        #[cfg(debug_assertions)]
        debug_assert!(
            is_monotonic(&before, &self.board),
            "Occupied cells must never change"
        );

        Ok(())
    }

    /// Scans for a win or draw.
    pub fn check_completion(&self) -> Completion {
        rules::check_completion(&self.board)
    }

    /// Chooses a move for `player` without applying it.
    ///
    /// # Errors
    ///
    /// See [`strategy::select_move`].
    #[instrument(skip(self, rng))]
    pub fn select_automated_move<R: Rng + ?Sized>(
        &self,
        player: Player,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Position, MoveError> {
        strategy::select_move(&self.board, player, difficulty, rng)
    }

    /// Clears every cell.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.clear();
        debug!("Board reset");
    }
}

/// Every cell occupied in `before` is unchanged in `after`.
#[cfg(debug_assertions)]
fn is_monotonic(before: &Board, after: &Board) -> bool {
    before
        .cells()
        .iter()
        .zip(after.cells())
        .all(|(b, a)| *b == Cell::Empty || b == a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_occupied_cell_rejected_without_change() {
        let mut engine = BoardEngine::new();
        engine.apply_move(Position::Center, Player::One).unwrap();
        let snapshot = engine.board().clone();

        assert_eq!(
            engine.apply_move(Position::Center, Player::Two),
            Err(MoveError::CellOccupied(Position::Center))
        );
        assert_eq!(engine.board(), &snapshot);
    }

    #[test]
    fn test_reset_clears() {
        let mut engine = BoardEngine::new();
        engine.apply_move(Position::TopLeft, Player::One).unwrap();
        engine.apply_move(Position::BottomRight, Player::Two).unwrap();
        engine.reset();
        assert!(engine.board().cells().iter().all(|c| *c == Cell::Empty));
        assert_eq!(engine.check_completion(), Completion::InProgress);
    }

    #[test]
    fn test_selected_move_is_applicable() {
        let mut engine = BoardEngine::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for turn in 0..9 {
            let player = if turn % 2 == 0 { Player::One } else { Player::Two };
            let pos = engine
                .select_automated_move(player, Difficulty::Easy, &mut rng)
                .unwrap();
            engine.apply_move(pos, player).unwrap();
        }
        assert!(engine.board().is_full());
        assert_eq!(
            engine.select_automated_move(Player::One, Difficulty::Easy, &mut rng),
            Err(MoveError::NoLegalMoveAvailable)
        );
    }
}
