//! Session error types.

use super::state::SessionState;
use derive_more::{Display, Error, From};
use turnclock_board::MoveError;

/// Why an input was rejected. Rejections never change session state.
#[derive(Debug, Clone, PartialEq, Display, Error, From)]
pub enum SessionError {
    /// The board refused the move.
    #[display("{}", _0)]
    #[from]
    Move(MoveError),

    /// Click index outside 0-8.
    #[display("Cell index {} is outside 0-8", _0)]
    InvalidCellIndex(#[error(not(source))] usize),

    /// Clicks are only accepted while a game is active.
    #[display("Session is {}, not active", _0)]
    NotActive(#[error(not(source))] SessionState),

    /// The automated opponent has the turn.
    #[display("Waiting for the automated opponent to move")]
    AwaitingOpponent,

    /// Tick delta was negative or not finite.
    #[display("Invalid tick delta: {} seconds", _0)]
    InvalidDelta(#[error(not(source))] f64),
}
