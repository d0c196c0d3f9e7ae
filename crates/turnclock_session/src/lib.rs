//! Timed tic-tac-toe session state machine.
//!
//! A [`Session`] walks `Initial → Idle → Active → Finished → Idle …`, gives
//! each turn a time budget, plays a random forfeiture move when the budget
//! runs out, and can drive an automated opponent. It is driven by discrete
//! inputs plus an external [`tick`](Session::tick), and reports everything
//! to a [`SessionObserver`].
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use turnclock_session::{Notification, Session, SessionConfig, SessionState};
//!
//! let config = SessionConfig::default().with_max_time_per_turn(Duration::from_secs(10));
//! let mut session = Session::with_seed(config, Vec::<Notification>::new(), 7)?;
//! session.startup();
//! session.request_start();
//! session.request_cell_click(4)?;
//! session.tick(Duration::from_secs(10));
//!
//! assert_eq!(session.state(), SessionState::Active);
//! assert_eq!(session.history().len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod clock;
mod config;
mod error;
mod event;
pub mod invariants;
mod schedule;
mod session;
mod state;

pub use action::{Move, MoveKind};
pub use clock::TurnClock;
pub use config::{ConfigError, GameMode, SessionConfig};
pub use error::SessionError;
pub use event::{Notification, SessionObserver};
pub use session::Session;
pub use state::{Outcome, SessionState, Transition, Trigger, resolve};
