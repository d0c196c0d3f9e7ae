//! Properties every game in progress must satisfy.
//!
//! Checked after each applied move in debug builds.

use super::action::Move;
use turnclock_board::{Board, Cell, Player, Position};

/// Borrowed view of the game being checked.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    /// Current board.
    pub board: &'a Board,
    /// Moves applied this game, oldest first.
    pub history: &'a [Move],
    /// Player who opened the game.
    pub first_turn: Player,
}

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Returns the descriptions of every violated invariant.
    fn check_all(state: &S) -> Result<(), Vec<&'static str>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<&'static str>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(I1::description());
        }
        if !I2::holds(state) {
            violations.push(I2::description());
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Replaying the history onto an empty board reproduces the board, and no
/// move ever landed on an occupied cell.
pub struct MonotonicBoardInvariant;

impl<'a> Invariant<GameView<'a>> for MonotonicBoardInvariant {
    fn holds(view: &GameView<'a>) -> bool {
        let mut cells = [Cell::Empty; 9];
        for mv in view.history {
            let slot = &mut cells[mv.position.to_index()];
            if *slot != Cell::Empty {
                return false;
            }
            *slot = Cell::Occupied(mv.player);
        }
        Position::ALL
            .iter()
            .all(|pos| view.board.get(*pos) == cells[pos.to_index()])
    }

    fn description() -> &'static str {
        "Board cells are never overwritten"
    }
}

/// Moves alternate, starting with the opening player.
pub struct AlternatingTurnInvariant;

impl<'a> Invariant<GameView<'a>> for AlternatingTurnInvariant {
    fn holds(view: &GameView<'a>) -> bool {
        let mut expected = view.first_turn;
        for mv in view.history {
            if mv.player != expected {
                return false;
            }
            expected = expected.opponent();
        }
        true
    }

    fn description() -> &'static str {
        "Players alternate turns starting with the opener"
    }
}

/// All session invariants.
pub type SessionInvariants = (MonotonicBoardInvariant, AlternatingTurnInvariant);
