//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Player, WinLine};
use tracing::instrument;

/// A completed line and its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Win {
    /// Player holding the line.
    pub player: Player,
    /// The completed line.
    pub line: WinLine,
}

/// Checks if there is a winner on the board.
///
/// Lines are scanned rows ascending, then columns ascending, then the main
/// diagonal, then the anti-diagonal. The first complete line wins, so a board
/// with several complete lines still yields one deterministic answer.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Win> {
    WinLine::ALL.iter().find_map(|&line| {
        let [a, b, c] = line.positions();
        let cell = board.get(a);
        match cell {
            Cell::Occupied(player) if cell == board.get(b) && cell == board.get(c) => {
                Some(Win { player, line })
            }
            _ => None,
        }
    })
}
