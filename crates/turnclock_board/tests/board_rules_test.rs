//! Rule-engine scenarios and board properties.

use proptest::prelude::*;
use turnclock_board::{Board, BoardEngine, Cell, Completion, MoveError, Player, Position, WinLine};

/// One of the eight symmetries of the square, as a map on (row, col).
#[derive(Debug, Clone, Copy)]
enum Symmetry {
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
    FlipHorizontal,
    FlipVertical,
    Transpose,
    AntiTranspose,
}

const SYMMETRIES: [Symmetry; 8] = [
    Symmetry::Identity,
    Symmetry::Rotate90,
    Symmetry::Rotate180,
    Symmetry::Rotate270,
    Symmetry::FlipHorizontal,
    Symmetry::FlipVertical,
    Symmetry::Transpose,
    Symmetry::AntiTranspose,
];

impl Symmetry {
    fn apply(self, pos: Position) -> Position {
        let (r, c) = (pos.row(), pos.col());
        let (r, c) = match self {
            Symmetry::Identity => (r, c),
            Symmetry::Rotate90 => (c, 2 - r),
            Symmetry::Rotate180 => (2 - r, 2 - c),
            Symmetry::Rotate270 => (2 - c, r),
            Symmetry::FlipHorizontal => (r, 2 - c),
            Symmetry::FlipVertical => (2 - r, c),
            Symmetry::Transpose => (c, r),
            Symmetry::AntiTranspose => (2 - c, 2 - r),
        };
        Position::from_row_col(r, c).expect("symmetry stays on the board")
    }

    /// The line whose cell set equals the image of `line`.
    fn apply_line(self, line: WinLine) -> WinLine {
        let mut image: Vec<usize> = line
            .positions()
            .iter()
            .map(|p| self.apply(*p).to_index())
            .collect();
        image.sort_unstable();
        WinLine::ALL
            .iter()
            .copied()
            .find(|candidate| {
                let mut cells: Vec<usize> =
                    candidate.positions().iter().map(|p| p.to_index()).collect();
                cells.sort_unstable();
                cells == image
            })
            .expect("symmetries map lines to lines")
    }
}

fn play(moves: &[(usize, Player)]) -> BoardEngine {
    let mut engine = BoardEngine::new();
    for (index, player) in moves {
        let pos = Position::from_index(*index).expect("index in range");
        engine.apply_move(pos, *player).expect("legal move");
    }
    engine
}

#[test]
fn test_row_win_scenario() {
    let engine = play(&[
        (0, Player::One),
        (4, Player::Two),
        (1, Player::One),
        (5, Player::Two),
        (2, Player::One),
    ]);
    let completion = engine.check_completion();
    assert_eq!(
        completion,
        Completion::Win {
            player: Player::One,
            line: WinLine::TopRow
        }
    );
    if let Completion::Win { line, .. } = completion {
        assert_eq!(line.id(), 0);
    }
}

#[test]
fn test_full_board_without_line_is_draw() {
    // X O X
    // X O O
    // O X X
    let engine = play(&[
        (0, Player::One),
        (1, Player::Two),
        (2, Player::One),
        (4, Player::Two),
        (3, Player::One),
        (5, Player::Two),
        (7, Player::One),
        (6, Player::Two),
        (8, Player::One),
    ]);
    assert_eq!(engine.check_completion(), Completion::Draw);
}

#[test]
fn test_partial_board_in_progress() {
    let engine = play(&[(4, Player::One), (0, Player::Two)]);
    assert_eq!(engine.check_completion(), Completion::InProgress);
    assert!(!engine.check_completion().is_terminal());
}

#[test]
fn test_win_detection_is_symmetric() {
    for line in WinLine::ALL {
        for symmetry in SYMMETRIES {
            let mut engine = BoardEngine::new();
            for pos in line.positions() {
                engine.apply_move(symmetry.apply(pos), Player::Two).unwrap();
            }
            assert_eq!(
                engine.check_completion(),
                Completion::Win {
                    player: Player::Two,
                    line: symmetry.apply_line(line)
                },
                "{line:?} under {symmetry:?}"
            );
        }
    }
}

#[test]
fn test_clicking_occupied_cell_twice_is_idempotent() {
    let mut engine = play(&[(4, Player::One)]);
    let before = engine.board().clone();

    for _ in 0..2 {
        assert_eq!(
            engine.apply_move(Position::Center, Player::Two),
            Err(MoveError::CellOccupied(Position::Center))
        );
        assert_eq!(engine.board(), &before);
    }
}

#[test]
fn test_reset_yields_empty_board() {
    let mut engine = play(&[(0, Player::One), (8, Player::Two), (4, Player::One)]);
    engine.reset();
    assert_eq!(engine.board(), &Board::new());
}

proptest! {
    #[test]
    fn prop_occupied_cells_never_change(indices in prop::collection::vec(0usize..9, 1..40)) {
        let mut engine = BoardEngine::new();
        let mut player = Player::One;
        for index in indices {
            let pos = Position::from_index(index).unwrap();
            let before = engine.board().clone();
            match engine.apply_move(pos, player) {
                Ok(()) => {
                    prop_assert_eq!(before.get(pos), Cell::Empty);
                    prop_assert_eq!(engine.board().get(pos), Cell::Occupied(player));
                    player = player.opponent();
                }
                Err(MoveError::CellOccupied(p)) => {
                    prop_assert_eq!(p, pos);
                    prop_assert_eq!(engine.board(), &before);
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
            for p in Position::ALL {
                if before.get(p) != Cell::Empty {
                    prop_assert_eq!(engine.board().get(p), before.get(p));
                }
            }
        }
    }
}
