//! Headless games under virtual time.

use crate::config::AppConfig;
use anyhow::{Result, bail};
use serde::Serialize;
use tracing::{info, instrument};
use turnclock_board::Player;
use turnclock_session::{MoveKind, Notification, Outcome, Session, SessionObserver, SessionState};

/// Counts what happened across simulated games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Games that reached an outcome.
    pub games: u32,
    /// Wins for player one.
    pub player_one_wins: u32,
    /// Wins for player two.
    pub player_two_wins: u32,
    /// Drawn games.
    pub draws: u32,
    /// Moves played because a turn clock ran out.
    pub forfeit_moves: u32,
    /// Moves played by the automated opponent.
    pub automated_moves: u32,
}

impl SessionObserver for Tally {
    fn notify(&mut self, notification: &Notification) {
        match notification {
            Notification::GameFinished(outcome) => {
                self.games += 1;
                match outcome {
                    Outcome::Win { player: Player::One, .. } => self.player_one_wins += 1,
                    Outcome::Win { player: Player::Two, .. } => self.player_two_wins += 1,
                    Outcome::Draw => self.draws += 1,
                    Outcome::Ended => {}
                }
            }
            Notification::MovePlayed(mv) => match mv.kind {
                MoveKind::Forfeit => self.forfeit_moves += 1,
                MoveKind::Automated => self.automated_moves += 1,
                MoveKind::Placed => {}
            },
            _ => {}
        }
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "games: {}, player 1 wins: {}, player 2 wins: {}, draws: {}, forfeits: {}, computer moves: {}",
            self.games,
            self.player_one_wins,
            self.player_two_wins,
            self.draws,
            self.forfeit_moves,
            self.automated_moves
        )
    }
}

/// Plays `games` games with nobody at the keyboard.
///
/// Human turns run out and are forfeited; the opponent moves after its
/// thinking pause. Time advances by the configured tick interval per step.
///
/// # Errors
///
/// Fails on an invalid config, or if the session stops making progress.
#[instrument(skip(config), fields(mode = %config.session().game_mode()))]
pub fn run_simulation(config: &AppConfig, games: u32) -> Result<Tally> {
    config.validate()?;
    let seed = (*config.seed()).unwrap_or_default();
    let step = config.tick_interval();
    let mut session = Session::with_seed(config.session().clone(), Tally::default(), seed)?;
    session.startup();

    let session_config = config.session();
    let per_turn = *session_config.max_time_per_turn() + *session_config.ai_think_delay();
    let per_game = per_turn * 9 + *session_config.finished_to_idle_delay();
    let steps_per_game = per_game.as_nanos() / step.as_nanos() + 10;
    let budget = steps_per_game * u128::from(games.max(1));

    let mut steps = 0u128;
    while session.observer().games < games {
        if session.state() == SessionState::Idle {
            session.request_start();
        }
        session.tick(step);
        steps += 1;
        if steps > budget {
            bail!("Simulation stalled after {} steps in {}", steps, session.state());
        }
    }

    let tally = session.observer().clone();
    info!(seed, steps, %tally, "Simulation complete");
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Overrides;
    use turnclock_session::GameMode;

    fn fast(mode: GameMode, seed: u64) -> AppConfig {
        let overrides = Overrides {
            mode: Some(mode),
            max_turn_secs: Some(1.0),
            finished_delay_secs: Some(0.5),
            think_secs: Some(0.2),
            tick_ms: Some(100),
            seed: Some(seed),
            ..Overrides::default()
        };
        AppConfig::default().with_overrides(&overrides).unwrap()
    }

    #[test]
    fn test_duo_games_are_all_forfeits() {
        let tally = run_simulation(&fast(GameMode::Duo, 5), 4).unwrap();
        assert_eq!(tally.games, 4);
        assert_eq!(tally.player_one_wins + tally.player_two_wins + tally.draws, 4);
        assert_eq!(tally.automated_moves, 0);
        assert!(tally.forfeit_moves >= 4 * 5);
    }

    #[test]
    fn test_single_player_opponent_moves() {
        let tally = run_simulation(&fast(GameMode::SinglePlayer, 5), 3).unwrap();
        assert_eq!(tally.games, 3);
        assert!(tally.automated_moves > 0);
        assert!(tally.forfeit_moves > 0);
    }

    #[test]
    fn test_zero_tick_interval_is_an_error_not_a_panic() {
        let config: AppConfig = toml::from_str("tick_interval_ms = 0").unwrap();
        assert!(run_simulation(&config, 1).is_err());
    }

    #[test]
    fn test_simulation_is_reproducible() {
        let config = fast(GameMode::SinglePlayer, 42);
        assert_eq!(
            run_simulation(&config, 5).unwrap(),
            run_simulation(&config, 5).unwrap()
        );
    }
}
