//! Core domain types for the tic-tac-toe board.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Player {
    /// Player one, marks with X.
    #[strum(to_string = "Player 1")]
    One,
    /// Player two, marks with O.
    #[strum(to_string = "Player 2")]
    Two,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Returns the mark drawn for this player.
    pub fn mark(self) -> char {
        match self {
            Player::One => 'X',
            Player::Two => 'O',
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a player.
    Occupied(Player),
}

impl Cell {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Writes a cell without checking occupancy. Callers enforce the rules.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Sets every cell back to empty.
    pub(crate) fn clear(&mut self) {
        self.cells = [Cell::Empty; 9];
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Checks if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Returns the cells as a grid indexed by `[row][col]`.
    pub fn rows(&self) -> [[Cell; 3]; 3] {
        let c = &self.cells;
        [[c[0], c[1], c[2]], [c[3], c[4], c[5]], [c[6], c[7], c[8]]]
    }

    /// Number of cells held by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(player))
            .count()
    }

    /// Empty positions in index order.
    pub fn legal_moves(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their index so a console player can type it.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.cells[pos] {
                    Cell::Empty => result.push_str(&pos.to_string()),
                    Cell::Occupied(player) => result.push(player.mark()),
                }
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent().opponent(), Player::Two);
    }

    #[test]
    fn test_display_shows_indices_and_marks() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Cell::Occupied(Player::One));
        board.set(Position::Center, Cell::Occupied(Player::Two));
        assert_eq!(board.display(), "X|1|2\n-+-+-\n3|O|5\n-+-+-\n6|7|8");
    }

    #[test]
    fn test_rows_match_linear_layout() {
        let mut board = Board::new();
        board.set(Position::MiddleRight, Cell::Occupied(Player::One));
        assert_eq!(board.rows()[1][2], Cell::Occupied(Player::One));
        assert_eq!(board.rows()[2][1], Cell::Empty);
    }

    #[test]
    fn test_clear_empties_board() {
        let mut board = Board::new();
        board.set(Position::BottomLeft, Cell::Occupied(Player::Two));
        board.clear();
        assert_eq!(board, Board::new());
        assert_eq!(board.legal_moves().len(), 9);
    }
}
