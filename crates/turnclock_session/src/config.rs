//! Session configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;
use turnclock_board::{Difficulty, Player};

/// Who plays the two sides.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum GameMode {
    /// Two humans share the input.
    #[default]
    Duo,
    /// One human against the automated opponent.
    SinglePlayer,
}

/// Static settings for the life of a session.
///
/// Durations are written as seconds (`max_time_per_turn = 120.0`).
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct SessionConfig {
    /// Budget for a single turn before a forfeiture move is played.
    #[serde(default = "default_max_time_per_turn", with = "secs")]
    max_time_per_turn: Duration,

    /// Dwell in the finished state before returning to idle.
    #[serde(default = "default_finished_to_idle_delay", with = "secs")]
    finished_to_idle_delay: Duration,

    /// Pause before the automated opponent moves.
    #[serde(default = "default_ai_think_delay", with = "secs")]
    ai_think_delay: Duration,

    /// Duo or single player.
    #[serde(default)]
    game_mode: GameMode,

    /// Opponent strength in single-player mode.
    #[serde(default)]
    difficulty: Difficulty,

    /// Side the human plays in single-player mode.
    #[serde(default = "default_human_player")]
    human_player: Player,

    /// Display name for player one.
    #[serde(default = "default_player_one_name")]
    #[setters(into)]
    player_one_name: String,

    /// Display name for player two.
    #[serde(default = "default_player_two_name")]
    #[setters(into)]
    player_two_name: String,
}

fn default_max_time_per_turn() -> Duration {
    Duration::from_secs(120)
}

fn default_finished_to_idle_delay() -> Duration {
    Duration::from_secs(3)
}

fn default_ai_think_delay() -> Duration {
    Duration::from_secs(1)
}

fn default_human_player() -> Player {
    Player::One
}

fn default_player_one_name() -> String {
    "Player 1".to_string()
}

fn default_player_two_name() -> String {
    "Player 2".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_time_per_turn: default_max_time_per_turn(),
            finished_to_idle_delay: default_finished_to_idle_delay(),
            ai_think_delay: default_ai_think_delay(),
            game_mode: GameMode::default(),
            difficulty: Difficulty::default(),
            human_player: default_human_player(),
            player_one_name: default_player_one_name(),
            player_two_name: default_player_two_name(),
        }
    }
}

impl SessionConfig {
    /// Checks the settings can drive a session.
    ///
    /// # Errors
    ///
    /// Rejects a zero turn budget, and single-player mode with a difficulty
    /// that has no move-selection policy.
    #[instrument(skip(self), fields(mode = %self.game_mode, difficulty = %self.difficulty))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_time_per_turn.is_zero() {
            return Err(ConfigError::new("max_time_per_turn must be greater than zero"));
        }
        if self.game_mode == GameMode::SinglePlayer && !self.difficulty.is_implemented() {
            return Err(ConfigError::new(format!(
                "difficulty '{}' has no move-selection policy yet",
                self.difficulty
            )));
        }
        Ok(())
    }

    /// Display name for `player`.
    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.player_one_name,
            Player::Two => &self.player_two_name,
        }
    }

    /// Whether `player` takes input from a human.
    pub fn is_human(&self, player: Player) -> bool {
        match self.game_mode {
            GameMode::Duo => true,
            GameMode::SinglePlayer => player == self.human_player,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Serde adapter writing a [`Duration`] as fractional seconds.
mod secs {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let seconds = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(seconds)
            .map_err(|e| D::Error::custom(format!("invalid duration {seconds}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(*config.max_time_per_turn(), Duration::from_secs(120));
        assert_eq!(config.player_name(Player::Two), "Player 2");
    }

    #[test]
    fn test_zero_turn_budget_rejected() {
        let config = SessionConfig::default().with_max_time_per_turn(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unimplemented_difficulty_rejected_only_against_ai() {
        let duo = SessionConfig::default().with_difficulty(Difficulty::Legendary);
        assert!(duo.validate().is_ok());

        let solo = duo.with_game_mode(GameMode::SinglePlayer);
        let err = solo.validate().unwrap_err();
        assert!(err.message.contains("legendary"));
    }

    #[test]
    fn test_humans_by_mode() {
        let duo = SessionConfig::default();
        assert!(duo.is_human(Player::One) && duo.is_human(Player::Two));

        let solo = SessionConfig::default()
            .with_game_mode(GameMode::SinglePlayer)
            .with_human_player(Player::Two);
        assert!(!solo.is_human(Player::One));
        assert!(solo.is_human(Player::Two));
    }

    #[test]
    fn test_toml_uses_seconds_and_defaults() {
        let config: SessionConfig = toml::from_str(
            r#"
            max_time_per_turn = 10.5
            game_mode = "single-player"
            player_two_name = "Computer"
            "#,
        )
        .unwrap();
        assert_eq!(*config.max_time_per_turn(), Duration::from_millis(10_500));
        assert_eq!(*config.game_mode(), GameMode::SinglePlayer);
        assert_eq!(*config.finished_to_idle_delay(), Duration::from_secs(3));
        assert_eq!(config.player_name(Player::Two), "Computer");
    }

    #[test]
    fn test_negative_duration_rejected() {
        let result: Result<SessionConfig, _> = toml::from_str("ai_think_delay = -1.0");
        assert!(result.is_err());
    }
}
