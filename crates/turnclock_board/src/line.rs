//! The eight winning lines and their identifiers.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// A row, column, or diagonal of three cells.
///
/// Declaration order is the scan order used by win detection, and the
/// discriminant is the line identifier handed to the presentation layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum WinLine {
    /// Row 0 (identifier 0).
    TopRow,
    /// Row 1 (identifier 1).
    MiddleRow,
    /// Row 2 (identifier 2).
    BottomRow,
    /// Column 0 (identifier 3).
    LeftColumn,
    /// Column 1 (identifier 4).
    CenterColumn,
    /// Column 2 (identifier 5).
    RightColumn,
    /// Top-left to bottom-right (identifier 6).
    MainDiagonal,
    /// Top-right to bottom-left (identifier 7).
    AntiDiagonal,
}

impl WinLine {
    /// All lines in scan order.
    pub const ALL: [WinLine; 8] = [
        WinLine::TopRow,
        WinLine::MiddleRow,
        WinLine::BottomRow,
        WinLine::LeftColumn,
        WinLine::CenterColumn,
        WinLine::RightColumn,
        WinLine::MainDiagonal,
        WinLine::AntiDiagonal,
    ];

    /// Line identifier (0-7).
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Line from its identifier.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// The three positions on this line.
    pub fn positions(self) -> [Position; 3] {
        use Position::*;
        match self {
            WinLine::TopRow => [TopLeft, TopCenter, TopRight],
            WinLine::MiddleRow => [MiddleLeft, Center, MiddleRight],
            WinLine::BottomRow => [BottomLeft, BottomCenter, BottomRight],
            WinLine::LeftColumn => [TopLeft, MiddleLeft, BottomLeft],
            WinLine::CenterColumn => [TopCenter, Center, BottomCenter],
            WinLine::RightColumn => [TopRight, MiddleRight, BottomRight],
            WinLine::MainDiagonal => [TopLeft, Center, BottomRight],
            WinLine::AntiDiagonal => [TopRight, Center, BottomLeft],
        }
    }
}
