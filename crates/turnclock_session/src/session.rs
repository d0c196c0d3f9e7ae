//! The session state machine.

use super::action::{Move, MoveKind};
use super::clock::TurnClock;
use super::config::{ConfigError, GameMode, SessionConfig};
use super::error::SessionError;
use super::event::{Notification, SessionObserver};
use super::invariants::{GameView, InvariantSet, SessionInvariants};
use super::schedule::{Continuation, Fired, Schedule};
use super::state::{Outcome, SessionState, Transition, Trigger, resolve};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use turnclock_board::{Board, BoardEngine, Completion, Difficulty, MoveError, Player, Position};

/// One tic-tac-toe session: lifecycle, turn order, clock and opponent.
///
/// All input goes through `request_*` and [`tick`](Self::tick); all output
/// goes to the observer `O`. `R` is the random source used for forfeiture
/// and opponent moves.
pub struct Session<O = Vec<Notification>, R = ChaCha8Rng> {
    config: SessionConfig,
    state: SessionState,
    engine: BoardEngine,
    current_turn: Player,
    first_turn: Player,
    clock: TurnClock,
    schedule: Schedule,
    /// Bumped on every lifecycle transition; stale continuations compare against it.
    epoch: u64,
    history: Vec<Move>,
    rng: R,
    observer: O,
}

impl<O: SessionObserver> Session<O, ChaCha8Rng> {
    /// Creates a session with a seeded ChaCha8 random source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config fails validation.
    pub fn with_seed(config: SessionConfig, observer: O, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, observer, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<O: SessionObserver, R: Rng> Session<O, R> {
    /// Creates a session in the `Initial` state.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config fails validation.
    #[instrument(skip_all, fields(mode = %config.game_mode(), difficulty = %config.difficulty()))]
    pub fn new(config: SessionConfig, observer: O, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        info!("Creating session");
        Ok(Self::unchecked(config, observer, rng))
    }

    fn unchecked(config: SessionConfig, observer: O, rng: R) -> Self {
        let clock = TurnClock::new(*config.max_time_per_turn());
        Self {
            config,
            state: SessionState::Initial,
            engine: BoardEngine::new(),
            current_turn: Player::One,
            first_turn: Player::One,
            clock,
            schedule: Schedule::new(),
            epoch: 0,
            history: Vec::new(),
            rng,
            observer,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Inputs
    // ─────────────────────────────────────────────────────────────

    /// Moves `Initial` to `Idle`. Returns false if already started.
    pub fn startup(&mut self) -> bool {
        self.fire(Trigger::Startup)
    }

    /// Starts a game from `Idle`. Returns false in any other state.
    pub fn request_start(&mut self) -> bool {
        self.fire(Trigger::StartRequested)
    }

    /// Aborts an active game, or skips the finished dwell. Returns false otherwise.
    pub fn request_reset(&mut self) -> bool {
        self.fire(Trigger::ResetRequested)
    }

    /// Ends an active game without a result. Returns false otherwise.
    pub fn request_end(&mut self) -> bool {
        self.fire(Trigger::EndRequested)
    }

    /// Places the current player's mark at `index` (row-major 0-8).
    ///
    /// Returns the board result after the move.
    ///
    /// # Errors
    ///
    /// Rejected, with no state change, when the session is not active, the
    /// index is out of range, the automated opponent has the turn, or the cell
    /// is occupied.
    #[instrument(skip(self), fields(state = %self.state, turn = %self.current_turn))]
    pub fn request_cell_click(&mut self, index: usize) -> Result<Completion, SessionError> {
        let result = self.try_click(index);
        if let Err(e) = &result {
            warn!(index, error = %e, "Click rejected");
            self.emit(Notification::MoveRejected {
                index,
                reason: e.to_string(),
            });
        }
        result
    }

    fn try_click(&mut self, index: usize) -> Result<Completion, SessionError> {
        if self.state != SessionState::Active {
            return Err(SessionError::NotActive(self.state));
        }
        let position = Position::from_index(index).ok_or(SessionError::InvalidCellIndex(index))?;
        if !self.config.is_human(self.current_turn) {
            return Err(SessionError::AwaitingOpponent);
        }
        Ok(self.play(position, self.current_turn, MoveKind::Placed)?)
    }

    /// Advances time by `delta`.
    ///
    /// Due continuations run first. Then, while active, the turn clock
    /// advances and an expired turn is forfeited with one automated move.
    /// A clock that a continuation just reset is not charged for this
    /// delta, since that time passed before the new turn began.
    /// While idle the clock is held at its maximum.
    #[instrument(level = "trace", skip(self), fields(state = %self.state))]
    pub fn tick(&mut self, delta: Duration) {
        let epoch = self.epoch;
        let moves_played = self.history.len();
        for fired in self.schedule.advance(delta) {
            self.run_continuation(fired);
        }
        let clock_restarted = self.epoch != epoch || self.history.len() != moves_played;

        match self.state {
            SessionState::Active if clock_restarted => {}
            SessionState::Active => {
                let remaining = self.clock.advance(delta);
                self.emit(Notification::ClockChanged(remaining));
                if self.clock.is_expired() {
                    self.forfeit_turn();
                }
            }
            SessionState::Idle => self.clock.reset(),
            SessionState::Initial | SessionState::Finished => {}
        }
    }

    /// [`tick`](Self::tick) with a delta in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidDelta`] for negative or non-finite input.
    pub fn tick_secs(&mut self, seconds: f64) -> Result<(), SessionError> {
        let delta = Duration::try_from_secs_f64(seconds).map_err(|_| {
            warn!(seconds, "Ignoring invalid tick delta");
            SessionError::InvalidDelta(seconds)
        })?;
        self.tick(delta);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────────

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The board.
    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    /// Player to move.
    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    /// Player who opens the next (or current) game.
    pub fn first_turn(&self) -> Player {
        self.first_turn
    }

    /// Time left on the current turn.
    pub fn remaining_turn_time(&self) -> Duration {
        self.clock.remaining()
    }

    /// Time spent on the current turn.
    pub fn elapsed_turn_time(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Moves applied in the current game.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Session settings.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// True while the automated opponent's move is pending.
    pub fn is_opponent_thinking(&self) -> bool {
        self.state == SessionState::Active && self.schedule.opponent_pending(self.epoch)
    }

    /// Time left before a finished game returns to idle.
    pub fn finished_dwell_remaining(&self) -> Option<Duration> {
        if self.state == SessionState::Finished && self.schedule.lifecycle_pending(self.epoch) {
            self.schedule.lifecycle_remaining()
        } else {
            None
        }
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    // ─────────────────────────────────────────────────────────────
    //  Lifecycle
    // ─────────────────────────────────────────────────────────────

    fn fire(&mut self, trigger: Trigger) -> bool {
        match resolve(self.state, trigger) {
            Some(transition) => {
                self.apply_transition(transition);
                true
            }
            None => {
                debug!(state = %self.state, ?trigger, "Ignoring no-op transition");
                false
            }
        }
    }

    fn apply_transition(&mut self, transition: Transition) {
        let from = self.state;
        self.state = transition.target();
        self.epoch += 1;
        info!(%from, to = %self.state, ?transition, "Session transition");
        self.emit(Notification::StateChanged(self.state));

        match transition {
            Transition::Boot => {
                self.clock.reset();
                self.emit(Notification::ClockChanged(self.clock.remaining()));
            }
            Transition::Begin => {
                self.clear_game();
                self.current_turn = self.first_turn;
                self.emit(Notification::TurnChanged(self.current_turn));
                self.schedule_opponent_if_needed();
            }
            Transition::Conclude(outcome) => {
                info!(%outcome, "Game finished");
                self.emit(Notification::GameFinished(outcome));
                let delay = *self.config.finished_to_idle_delay();
                if self
                    .schedule
                    .schedule_lifecycle(delay, self.epoch, Trigger::DwellElapsed)
                {
                    debug!("Superseded a pending lifecycle continuation");
                }
            }
            Transition::Recycle => {
                self.first_turn = self.first_turn.opponent();
                debug!(first_turn = %self.first_turn, "Opening player swapped");
                self.clear_game();
            }
            Transition::Abort => self.clear_game(),
        }
    }

    fn clear_game(&mut self) {
        self.engine.reset();
        self.history.clear();
        self.clock.reset();
        self.emit(Notification::BoardChanged(self.engine.board().clone()));
        self.emit(Notification::ClockChanged(self.clock.remaining()));
    }

    fn run_continuation(&mut self, fired: Fired) {
        if fired.epoch != self.epoch {
            debug!(
                scheduled = fired.epoch,
                current = self.epoch,
                "Dropping stale continuation"
            );
            return;
        }

        match fired.continuation {
            Continuation::Lifecycle(trigger) => {
                self.fire(trigger);
            }
            Continuation::OpponentMove {
                player,
                moves_played,
            } => {
                if self.state != SessionState::Active
                    || self.current_turn != player
                    || self.history.len() != moves_played
                {
                    debug!(%player, moves_played, "Dropping outdated opponent move");
                    return;
                }
                self.play_opponent(player);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// Applies a move, then concludes the game or rotates the turn.
    fn play(
        &mut self,
        position: Position,
        player: Player,
        kind: MoveKind,
    ) -> Result<Completion, MoveError> {
        self.engine.apply_move(position, player)?;

        let mv = Move::new(player, position, kind);
        self.history.push(mv);
        debug_assert_eq!(
            SessionInvariants::check_all(&GameView {
                board: self.engine.board(),
                history: &self.history,
                first_turn: self.first_turn,
            }),
            Ok(())
        );

        debug!(%mv, "Move played");
        self.emit(Notification::MovePlayed(mv));
        self.emit(Notification::BoardChanged(self.engine.board().clone()));
        self.clock.reset();

        let completion = self.engine.check_completion();
        match Outcome::from_completion(completion) {
            Some(outcome) => {
                self.fire(Trigger::OutcomeReached(outcome));
            }
            None => self.rotate_turn(),
        }
        Ok(completion)
    }

    fn rotate_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
        self.clock.reset();
        self.emit(Notification::TurnChanged(self.current_turn));
        self.emit(Notification::ClockChanged(self.clock.remaining()));
        self.schedule_opponent_if_needed();
    }

    fn schedule_opponent_if_needed(&mut self) {
        if *self.config.game_mode() != GameMode::SinglePlayer
            || self.config.is_human(self.current_turn)
        {
            return;
        }

        let delay = *self.config.ai_think_delay();
        if delay.is_zero() {
            self.play_opponent(self.current_turn);
        } else {
            debug!(player = %self.current_turn, ?delay, "Opponent thinking");
            self.schedule
                .schedule_opponent(delay, self.epoch, self.current_turn, self.history.len());
        }
    }

    fn play_opponent(&mut self, player: Player) {
        let difficulty = *self.config.difficulty();
        self.play_automated(player, difficulty, MoveKind::Automated);
    }

    /// Plays one random move for the player whose clock ran out.
    fn forfeit_turn(&mut self) {
        let player = self.current_turn;
        info!(%player, "Turn clock expired");
        if self.schedule.cancel_opponent() {
            debug!("Forfeiture replaces pending opponent move");
        }
        self.play_automated(player, Difficulty::Easy, MoveKind::Forfeit);
    }

    fn play_automated(&mut self, player: Player, difficulty: Difficulty, kind: MoveKind) {
        let selected = self
            .engine
            .select_automated_move(player, difficulty, &mut self.rng);
        match selected {
            Ok(position) => {
                if let Err(e) = self.play(position, player, kind) {
                    error!(error = %e, %position, "Automated move rejected by board");
                }
            }
            Err(MoveError::NoLegalMoveAvailable) => {
                error!(%player, "No legal move for automated player; treating as draw");
                self.fire(Trigger::OutcomeReached(Outcome::Draw));
            }
            Err(MoveError::DifficultyUnimplemented(tier)) => {
                // Validated configs never get here.
                error!(%tier, %player, "No policy for difficulty; forfeiting the turn");
                self.play_automated(player, Difficulty::Easy, MoveKind::Forfeit);
            }
            Err(e @ MoveError::CellOccupied(_)) => {
                error!(error = %e, %player, "Automated selection picked an occupied cell");
            }
        }
    }

    fn emit(&mut self, notification: Notification) {
        self.observer.notify(&notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unimplemented_opponent_forfeits_instead_of_stalling() {
        let config = SessionConfig::default()
            .with_game_mode(GameMode::SinglePlayer)
            .with_difficulty(Difficulty::Legendary)
            .with_ai_think_delay(Duration::ZERO);
        assert!(config.validate().is_err());

        let rng = ChaCha8Rng::seed_from_u64(3);
        let mut session = Session::unchecked(config, Vec::<Notification>::new(), rng);
        session.startup();
        session.request_start();
        session.request_cell_click(4).unwrap();

        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[1].player, Player::Two);
        assert_eq!(session.history()[1].kind, MoveKind::Forfeit);
        assert_eq!(session.current_turn(), Player::One);
    }
}
