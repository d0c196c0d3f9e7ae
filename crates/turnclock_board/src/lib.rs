//! Tic-tac-toe board rules.
//!
//! Owns the 3x3 grid and nothing else: placement validation, win and draw
//! detection, and move selection for an automated player. There is no clock
//! and no notion of whose turn it is; the session crate layers those on top.
//!
//! # Example
//!
//! ```
//! use turnclock_board::{BoardEngine, Completion, Player, Position, WinLine};
//!
//! let mut engine = BoardEngine::new();
//! for (pos, player) in [
//!     (Position::TopLeft, Player::One),
//!     (Position::Center, Player::Two),
//!     (Position::TopCenter, Player::One),
//!     (Position::MiddleRight, Player::Two),
//!     (Position::TopRight, Player::One),
//! ] {
//!     engine.apply_move(pos, player)?;
//! }
//! assert_eq!(
//!     engine.check_completion(),
//!     Completion::Win { player: Player::One, line: WinLine::TopRow }
//! );
//! # Ok::<(), turnclock_board::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod line;
mod position;
pub mod rules;
mod strategy;
mod types;

pub use engine::BoardEngine;
pub use error::MoveError;
pub use line::WinLine;
pub use position::Position;
pub use rules::Completion;
pub use strategy::{Difficulty, select_move};
pub use types::{Board, Cell, Player};
